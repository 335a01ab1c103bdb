//! Terminal rendering of application snapshots.

use colored::{ColoredString, Colorize};
use studymate_application::AppSnapshot;
use studymate_core::action::ActionState;
use studymate_core::artifact::{HistoryEvent, QuestionKey, StudyArtifact};
use studymate_core::navigation::Screen;
use studymate_core::notification::{Notification, Severity};

pub fn notification_line(notification: &Notification) -> ColoredString {
    let text = format!("[{}] {}", notification.severity, notification.message);
    match notification.severity {
        Severity::Info => text.bright_blue(),
        Severity::Success => text.bright_green(),
        Severity::Warning => text.bright_yellow(),
        Severity::Error => text.bright_red(),
    }
}

/// Prompt text reflecting the current screen and any busy actions.
pub fn prompt(snapshot: &AppSnapshot) -> String {
    let busy = snapshot
        .actions
        .iter()
        .filter(|a| a.state == ActionState::Pending)
        .count();
    if busy > 0 {
        format!("{} ({} busy)> ", snapshot.navigation.current(), busy)
    } else {
        format!("{}> ", snapshot.navigation.current())
    }
}

pub fn render(snapshot: &AppSnapshot) {
    let session = &snapshot.session;
    let user = if session.is_authenticated() {
        format!("{} <{}>", session.display_name(), session.email())
    } else {
        "not signed in".to_string()
    };
    let path: Vec<String> = snapshot
        .navigation
        .history()
        .iter()
        .map(|s| s.to_string())
        .collect();

    println!("{}", format!("=== {} ===", snapshot.navigation.current()).bright_magenta().bold());
    println!("{}", format!("{} | {}", user, path.join(" > ")).bright_black());

    for action in snapshot.actions.iter().filter(|a| a.state != ActionState::Idle) {
        let line = format!("  {}: {}", action.kind, action.state);
        match action.state {
            ActionState::Failed => println!("{}", line.red()),
            ActionState::Pending => println!("{}", line.yellow()),
            _ => println!("{}", line.bright_black()),
        }
    }

    if let Some(notification) = &snapshot.notification {
        println!("{}", notification_line(notification));
    }

    match snapshot.navigation.current() {
        Screen::Entry => println!("Welcome to StudyMate. Use 'goto auth' to sign in."),
        Screen::Auth => println!("Sign in with 'login', 'register' or 'google'."),
        Screen::Dashboard => render_dashboard(snapshot),
        Screen::Upload => println!("Upload a document with 'upload <path>'."),
        Screen::StudyPlan => {
            if let Some(artifact) = &snapshot.artifact {
                render_study_plan(artifact);
            }
        }
        Screen::ConceptMap => {
            if let Some(artifact) = &snapshot.artifact {
                render_concept_map(artifact);
            }
        }
        Screen::Qa => render_answer(snapshot),
        Screen::Quiz => render_quiz(snapshot),
        Screen::History => render_history(snapshot),
    }

    if snapshot.navigation.drawer_open {
        println!("{}", "--- drawer ---".bright_black());
        render_history(snapshot);
    }
}

fn render_dashboard(snapshot: &AppSnapshot) {
    match &snapshot.artifact {
        Some(artifact) => println!(
            "Current document: {} ({:.0}% complete, ~{} min)",
            artifact.filename.bold(),
            artifact.study_plan.overall_progress_percent,
            artifact.study_plan.estimated_duration_minutes
        ),
        None => println!("No document yet. 'goto upload' to start."),
    }
}

fn render_study_plan(artifact: &StudyArtifact) {
    let plan = &artifact.study_plan;
    println!(
        "{} - {:.0}% complete",
        artifact.filename.bold(),
        plan.overall_progress_percent
    );
    for section in &plan.sections {
        let mark = if section.completed { "[x]".green() } else { "[ ]".normal() };
        println!("{} {}. {}", mark, section.id, section.title.bold());
        if !section.key_concepts.is_empty() {
            println!("      {}", section.key_concepts.join(", ").bright_black());
        }
    }
}

fn render_concept_map(artifact: &StudyArtifact) {
    let map = &artifact.concept_map;
    for node in &map.nodes {
        println!("  ({}) {}", node.node_type.bright_black(), node.label.bold());
    }
    for edge in &map.edges {
        println!("  {} --{}--> {}", edge.source, edge.edge_type.bright_black(), edge.target);
    }
}

fn render_answer(snapshot: &AppSnapshot) {
    match &snapshot.last_answer {
        Some(answer) => {
            println!("{}", format!("Q: {}", answer.question).green());
            for line in answer.answer.lines() {
                println!("{}", line.bright_blue());
            }
            println!(
                "{}",
                format!(
                    "confidence {:.0}% - {}",
                    answer.confidence * 100.0,
                    answer.explanation
                )
                .bright_black()
            );
        }
        None => println!("Ask about your document with 'ask <question>'."),
    }
}

fn render_quiz(snapshot: &AppSnapshot) {
    let Some(artifact) = &snapshot.artifact else {
        return;
    };
    for section in &artifact.study_plan.sections {
        for (index, question) in section.quiz_questions.iter().enumerate() {
            let key = QuestionKey::new(section.id, index);
            let entered = snapshot
                .quiz_submission
                .iter()
                .find(|a| QuestionKey::new(a.section_id, a.question_index) == key)
                .map(|a| a.answer.as_str())
                .unwrap_or("");
            println!("  {}.{} {}", section.id, index, question.question);
            if !entered.is_empty() {
                println!("       {}", entered.cyan());
            }
        }
    }

    if let Some(result) = &snapshot.quiz_result {
        println!(
            "{}",
            format!(
                "Score: {:.0}% ({}/{} correct)",
                result.overall_score_percent,
                result.correct_count(),
                result.results.len()
            )
            .bold()
        );
        for r in &result.results {
            let mark = if r.correct { "ok".green() } else { "x".red() };
            let explanation = r.explanation.as_deref().unwrap_or("");
            println!("  {} {}.{} {}", mark, r.section_id, r.question_index, explanation);
        }
    }
}

fn render_history(snapshot: &AppSnapshot) {
    if snapshot.history_log.is_empty() {
        println!("{}", "No activity yet.".bright_black());
        return;
    }
    for entry in &snapshot.history_log {
        let when = entry
            .parsed_timestamp()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| entry.timestamp.clone());
        match &entry.event {
            HistoryEvent::Upload { filename } => println!("  {} uploaded {}", when, filename),
            HistoryEvent::Quiz { score } => println!("  {} quiz {:.0}%", when, score),
        }
    }
}

//! Interactive REPL standing in for the presentation layer.
//!
//! Commands that reach the collaborator run on background tasks so the prompt
//! stays usable while they are pending; their completions come back over a
//! channel and are printed by a dedicated task.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use studymate_application::{NavigationOutcome, StudyMateApp};
use studymate_core::action::ActionKind;
use studymate_core::backend::{FederatedCredential, StudyBackend, UploadRequest};
use studymate_core::error::StudyMateError;
use tokio::sync::mpsc;

use crate::command::{self, COMMAND_WORDS, Command};
use crate::render;

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct ReplHelper {
    commands: Vec<String>,
    screens: Vec<String>,
}

impl ReplHelper {
    fn new() -> Self {
        Self {
            commands: COMMAND_WORDS.iter().map(|c| c.to_string()).collect(),
            screens: command::screen_names(),
        }
    }

    fn candidates<'a>(&'a self, line: &str) -> (usize, Vec<&'a String>) {
        match line.strip_prefix("goto ") {
            Some(partial) => (
                "goto ".len(),
                self.screens.iter().filter(|s| s.starts_with(partial)).collect(),
            ),
            None if !line.contains(' ') => {
                (0, self.commands.iter().filter(|c| c.starts_with(line)).collect())
            }
            None => (0, vec![]),
        }
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word.clone(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let word = line.split_whitespace().next().unwrap_or("");
        if line.starts_with(word) && self.commands.iter().any(|c| c == word) {
            Owned(format!("{}{}", word.bright_cyan(), &line[word.len()..]))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() {
            return None;
        }
        let (start, matches) = self.candidates(line);
        let typed = &line[start..];
        matches
            .into_iter()
            .find(|word| word.len() > typed.len())
            .map(|word| word[typed.len()..].to_string())
    }
}

impl Validator for ReplHelper {}

/// A background command that has finished.
struct Finished {
    kind: Option<ActionKind>,
    outcome: Result<String, StudyMateError>,
}

pub struct Repl {
    app: Arc<StudyMateApp>,
    backend: Arc<dyn StudyBackend>,
    notification_duration: Duration,
}

impl Repl {
    pub fn new(
        app: Arc<StudyMateApp>,
        backend: Arc<dyn StudyBackend>,
        notification_duration: Duration,
    ) -> Self {
        Self {
            app,
            backend,
            notification_duration,
        }
    }

    pub async fn run(self) -> Result<()> {
        let (done_tx, mut done_rx) = mpsc::channel::<Finished>(32);

        // Completion printer
        let printer_app = self.app.clone();
        let duration = self.notification_duration;
        tokio::spawn(async move {
            while let Some(finished) = done_rx.recv().await {
                let mut show_notification = true;
                match &finished.outcome {
                    Ok(summary) => println!("{}", summary.bright_white()),
                    Err(e) if e.is_stale() => {
                        println!("{}", "(result arrived too late and was discarded)".bright_black())
                    }
                    Err(e) if e.is_pending() => println!("{}", e.to_string().yellow()),
                    Err(e) => {
                        if let Some(message) = unreported_failure(finished.kind, e) {
                            println!("{}", message.red());
                            show_notification = false;
                        }
                    }
                }
                if show_notification {
                    if let Some(notification) = printer_app.snapshot().await.notification {
                        println!("{}", render::notification_line(&notification));
                    }
                }
                for kind in finished_kinds(finished.kind) {
                    printer_app.acknowledge(kind).await;
                }
                schedule_dismiss(printer_app.clone(), duration).await;
            }
        });

        let mut rl = Editor::new()?;
        rl.set_helper(Some(ReplHelper::new()));

        println!("{}", "=== StudyMate ===".bright_magenta().bold());
        println!("{}", "Type 'help' for commands, or 'quit' to exit.".bright_black());
        render::render(&self.app.snapshot().await);
        println!();

        loop {
            let prompt = render::prompt(&self.app.snapshot().await);
            let line = match rl.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let _ = rl.add_history_entry(trimmed);

            let command = match command::parse(trimmed) {
                Ok(command) => command,
                Err(message) => {
                    println!("{}", message.yellow());
                    continue;
                }
            };

            if command == Command::Quit {
                println!("{}", "Goodbye!".bright_green());
                break;
            }

            if command.is_remote() {
                let app = self.app.clone();
                let backend = self.backend.clone();
                let tx = done_tx.clone();
                tokio::spawn(async move {
                    let kind = action_kind(&command);
                    let outcome = run_remote(&app, backend.as_ref(), command).await;
                    if tx.send(Finished { kind, outcome }).await.is_err() {
                        tracing::debug!("[Repl] Printer gone; dropping completion");
                    }
                });
            } else {
                self.run_local(command).await;
                schedule_dismiss(self.app.clone(), self.notification_duration).await;
            }
        }

        Ok(())
    }

    async fn run_local(&self, command: Command) {
        let app = &self.app;
        match command {
            Command::Logout => app.logout().await,
            Command::Goto(screen) => {
                if app.go_to(screen).await == NavigationOutcome::Unchanged {
                    println!("{}", format!("Already on {}", screen).bright_black());
                }
            }
            Command::Back => {
                if !app.go_back().await {
                    println!("{}", "Nothing to go back to".bright_black());
                }
            }
            Command::Drawer => {
                app.toggle_drawer().await;
            }
            Command::Answer {
                section_id,
                question_index,
                text,
            } => app.set_quiz_answer(section_id, question_index, text).await,
            Command::ClearAnswers => app.clear_quiz_answers().await,
            Command::New => app.start_new_session().await,
            Command::Theme => {
                let dark = app.toggle_dark_mode().await;
                println!("Theme: {}", if dark { "dark" } else { "light" });
            }
            Command::Dismiss => app.dismiss_notification().await,
            Command::Help => print_help(),
            Command::Status => {}
            // Remote commands and quit are handled by the caller.
            _ => return,
        }
        render::render(&app.snapshot().await);
    }
}

fn action_kind(command: &Command) -> Option<ActionKind> {
    match command {
        Command::Login { .. } => Some(ActionKind::Login),
        Command::Register { .. } => Some(ActionKind::Register),
        Command::Google { .. } => Some(ActionKind::GoogleLogin),
        Command::Upload(_) => Some(ActionKind::Upload),
        Command::Ask(_) => Some(ActionKind::Ask),
        Command::Progress { .. } => Some(ActionKind::UpdateProgress),
        Command::Submit => Some(ActionKind::SubmitQuiz),
        Command::History => Some(ActionKind::FetchHistory),
        _ => None,
    }
}

/// Message for a failure that raised no notification: errors outside any
/// action (health, reading the upload file) and silent kinds.
fn unreported_failure(kind: Option<ActionKind>, error: &StudyMateError) -> Option<String> {
    let notified = match kind {
        Some(kind) => !kind.is_silent_on_failure() && !error.is_io(),
        None => false,
    };
    (!notified).then(|| error.user_message())
}

/// Action slots settled by a command; quiz submission also refreshes history.
fn finished_kinds(kind: Option<ActionKind>) -> Vec<ActionKind> {
    match kind {
        Some(ActionKind::SubmitQuiz) => vec![ActionKind::SubmitQuiz, ActionKind::FetchHistory],
        Some(kind) => vec![kind],
        None => vec![],
    }
}

async fn run_remote(
    app: &StudyMateApp,
    backend: &dyn StudyBackend,
    command: Command,
) -> Result<String, StudyMateError> {
    match command {
        Command::Login { email, password } => {
            let session = app.login(&email, &password).await?;
            Ok(format!("Signed in as {}", session.display_name()))
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let session = app.register(&name, &email, &password).await?;
            Ok(format!("Registered {}", session.display_name()))
        }
        Command::Google { credential } => {
            let session = app
                .login_with_federated_credential(FederatedCredential::new(credential))
                .await?;
            Ok(format!("Signed in as {}", session.display_name()))
        }
        Command::Upload(path) => {
            let request = read_upload(&path).await?;
            let artifact = app.upload(request).await?;
            Ok(format!(
                "{}: {} sections, {} concepts",
                artifact.filename,
                artifact.study_plan.sections.len(),
                artifact.concept_map.nodes.len()
            ))
        }
        Command::Ask(question) => Ok(app.ask(&question).await?.answer),
        Command::Progress {
            section_id,
            completed,
        } => {
            let percent = app.update_progress(section_id, completed).await?;
            Ok(format!("Overall progress {:.0}%", percent))
        }
        Command::Submit => {
            let result = app.submit_quiz().await?;
            Ok(format!(
                "{}/{} correct",
                result.correct_count(),
                result.results.len()
            ))
        }
        Command::History => {
            let entries = app.fetch_history().await?;
            Ok(format!("{} history entries", entries.len()))
        }
        Command::Health => {
            backend.health().await?;
            Ok("Service is up".to_string())
        }
        other => Err(StudyMateError::internal(format!(
            "{:?} is not a remote command",
            other
        ))),
    }
}

async fn read_upload(path: &Path) -> Result<UploadRequest, StudyMateError> {
    let bytes = tokio::fs::read(path).await?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    Ok(UploadRequest::new(filename, bytes))
}

/// Hides the visible notification after `duration` unless a newer one replaced it.
async fn schedule_dismiss(app: Arc<StudyMateApp>, duration: Duration) {
    if duration.is_zero() {
        return;
    }
    let shown = app.notifications_shown().await;
    tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        if app.notifications_shown().await == shown {
            app.dismiss_notification().await;
        }
    });
}

fn print_help() {
    let lines = [
        ("login <email> <password>", "Sign in"),
        ("register <name> <email> <password>", "Create an account"),
        ("google <credential>", "Sign in with a Google credential"),
        ("logout", "Sign out and reset"),
        ("goto <screen>", "Open a screen"),
        ("back", "Previous screen"),
        ("drawer", "Toggle the session drawer"),
        ("upload <path>", "Upload a document"),
        ("ask <question>", "Ask about the document"),
        ("progress <section> done|undo", "Mark a section"),
        ("answer <section> <question> <text>", "Enter a quiz answer"),
        ("clear-answers", "Clear quiz answers"),
        ("submit", "Submit the quiz"),
        ("history", "Refresh activity history"),
        ("new", "Start over with a new document"),
        ("theme", "Toggle dark mode"),
        ("health", "Check the service"),
        ("status", "Show the current screen"),
        ("dismiss", "Hide the notification"),
        ("quit", "Exit"),
    ];
    for (usage, text) in lines {
        println!("  {:<38} {}", usage.bright_cyan(), text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_candidates() {
        let helper = ReplHelper::new();

        let (start, matches) = helper.candidates("up");
        assert_eq!(start, 0);
        assert_eq!(matches, vec!["upload"]);

        let (start, matches) = helper.candidates("goto study");
        assert_eq!(start, 5);
        assert_eq!(matches, vec!["study_plan"]);
    }

    #[test]
    fn test_every_remote_action_has_a_kind() {
        let remote = command::parse("ask why").unwrap();
        assert_eq!(action_kind(&remote), Some(ActionKind::Ask));
        assert_eq!(action_kind(&Command::Health), None);
    }

    #[test]
    fn test_failures_without_notification_are_printed() {
        let down = StudyMateError::network("connection refused");
        assert!(unreported_failure(None, &down).is_some());

        let missing = StudyMateError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(unreported_failure(Some(ActionKind::Upload), &missing).is_some());

        let rejected = StudyMateError::auth("Invalid credentials");
        assert_eq!(unreported_failure(Some(ActionKind::Login), &rejected), None);
        assert_eq!(
            unreported_failure(Some(ActionKind::FetchHistory), &down).as_deref(),
            Some(down.user_message().as_str())
        );
    }

    #[test]
    fn test_quiz_submission_settles_history_too() {
        assert_eq!(
            finished_kinds(Some(ActionKind::SubmitQuiz)),
            vec![ActionKind::SubmitQuiz, ActionKind::FetchHistory]
        );
        assert_eq!(finished_kinds(Some(ActionKind::Ask)), vec![ActionKind::Ask]);
        assert!(finished_kinds(None).is_empty());
    }
}

//! REPL command parsing.

use std::path::PathBuf;
use std::str::FromStr;

use studymate_core::artifact::SectionId;
use studymate_core::navigation::Screen;

/// Command words offered for completion and hints.
pub const COMMAND_WORDS: &[&str] = &[
    "answer", "ask", "back", "clear-answers", "dismiss", "drawer", "google", "goto", "health",
    "help", "history", "login", "logout", "new", "progress", "quit", "register", "status",
    "submit", "theme", "upload",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Register { name: String, email: String, password: String },
    Google { credential: String },
    Logout,
    Goto(Screen),
    Back,
    Drawer,
    Upload(PathBuf),
    Ask(String),
    Progress { section_id: SectionId, completed: bool },
    Answer { section_id: SectionId, question_index: usize, text: String },
    ClearAnswers,
    Submit,
    History,
    New,
    Theme,
    Health,
    Status,
    Dismiss,
    Help,
    Quit,
}

impl Command {
    /// Whether the command calls the collaborator and should run in the background.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Command::Login { .. }
                | Command::Register { .. }
                | Command::Google { .. }
                | Command::Upload(_)
                | Command::Ask(_)
                | Command::Progress { .. }
                | Command::Submit
                | Command::History
                | Command::Health
        )
    }
}

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match word.to_ascii_lowercase().as_str() {
        "login" => match args.as_slice() {
            [email, password] => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            _ => return Err(usage("login <email> <password>")),
        },
        "register" => match args.as_slice() {
            [name @ .., email, password] if !name.is_empty() => Command::Register {
                name: name.join(" "),
                email: email.to_string(),
                password: password.to_string(),
            },
            _ => return Err(usage("register <name> <email> <password>")),
        },
        "google" => match args.as_slice() {
            [credential] => Command::Google {
                credential: credential.to_string(),
            },
            _ => return Err(usage("google <credential>")),
        },
        "logout" => Command::Logout,
        "goto" | "go" => {
            let screen = Screen::from_str(rest).map_err(|_| {
                format!(
                    "Unknown screen '{}'. Screens: {}",
                    rest,
                    screen_names().join(", ")
                )
            })?;
            Command::Goto(screen)
        }
        "back" => Command::Back,
        "drawer" => Command::Drawer,
        "upload" if !rest.is_empty() => Command::Upload(PathBuf::from(rest)),
        "upload" => return Err(usage("upload <path>")),
        "ask" => Command::Ask(rest.to_string()),
        "progress" => match args.as_slice() {
            [section, state] => Command::Progress {
                section_id: parse_number(section, "section")?,
                completed: match *state {
                    "done" | "on" | "true" => true,
                    "undo" | "off" | "false" => false,
                    _ => return Err(usage("progress <section> done|undo")),
                },
            },
            _ => return Err(usage("progress <section> done|undo")),
        },
        "answer" => match args.as_slice() {
            [section, question, text @ ..] if !text.is_empty() => Command::Answer {
                section_id: parse_number(section, "section")?,
                question_index: parse_number(question, "question")?,
                text: text.join(" "),
            },
            _ => return Err(usage("answer <section> <question> <text>")),
        },
        "clear-answers" => Command::ClearAnswers,
        "submit" => Command::Submit,
        "history" => Command::History,
        "new" => Command::New,
        "theme" => Command::Theme,
        "health" => Command::Health,
        "status" | "show" => Command::Status,
        "dismiss" => Command::Dismiss,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };
    Ok(command)
}

pub fn screen_names() -> Vec<String> {
    use strum::IntoEnumIterator;
    Screen::iter().map(|s| s.to_string()).collect()
}

fn parse_number<T: FromStr>(raw: &str, what: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("Invalid {} number '{}'", what, raw))
}

fn usage(text: &str) -> String {
    format!("Usage: {}", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_goto_is_case_insensitive() {
        assert_eq!(parse("goto StudY_PlaN"), Ok(Command::Goto(Screen::StudyPlan)));
        assert_eq!(parse("go qa"), Ok(Command::Goto(Screen::Qa)));
        assert!(parse("goto nowhere").unwrap_err().contains("study_plan"));
    }

    #[test]
    fn test_parse_register_joins_name() {
        assert_eq!(
            parse("register Ada Lovelace ada@example.com secret"),
            Ok(Command::Register {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                password: "secret".to_string(),
            })
        );
        assert!(parse("register ada@example.com secret").is_err());
    }

    #[test]
    fn test_parse_answer_and_progress() {
        assert_eq!(
            parse("answer 1 0 cells divide"),
            Ok(Command::Answer {
                section_id: 1,
                question_index: 0,
                text: "cells divide".to_string(),
            })
        );
        assert_eq!(
            parse("progress 2 done"),
            Ok(Command::Progress {
                section_id: 2,
                completed: true
            })
        );
        assert!(parse("progress x done").is_err());
    }

    #[test]
    fn test_ask_keeps_whole_question() {
        assert_eq!(
            parse("ask  What is mitosis? "),
            Ok(Command::Ask("What is mitosis?".to_string()))
        );
        // Empty questions are left to the app's validation.
        assert_eq!(parse("ask"), Ok(Command::Ask(String::new())));
    }

    #[test]
    fn test_remote_commands() {
        assert!(parse("submit").unwrap().is_remote());
        assert!(!parse("back").unwrap().is_remote());
        assert!(parse("bogus").is_err());
    }

    #[test]
    fn test_upload_path_may_contain_spaces() {
        assert_eq!(
            parse("upload My Notes/week 1.pdf"),
            Ok(Command::Upload(PathBuf::from("My Notes/week 1.pdf")))
        );
    }
}

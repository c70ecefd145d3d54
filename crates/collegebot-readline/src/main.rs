use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use collegebot_core::sanitize::{self, AnswerSpan};
use collegebot_core::{AskOutcome, Department, QAEntry, QuerySession};
use collegebot_infrastructure::{JsonHistoryRepository, JsonSelectionRepository};
use collegebot_interaction::QaApiAgent;

/// Suggested question starters, shown by /keywords.
const SUGGESTED_KEYWORDS: &[&str] = &[
    "hod",
    "faculty list",
    "who is [faculty name]",
    "subjects in semester [number]",
    "units of [subject name]",
    "elective courses available",
    "elective subjects in sem [number]",
    "mission and vision",
    "important questions link for [unit name]",
    "unit links of sem [number]",
    "display all the industrial projects done",
    "Tell me about the [project name]",
    "project ideas",
    "credits for [code / subject name]",
    "conference paper published",
];

const COMMANDS: &[&str] = &[
    "/dept", "/history", "/open", "/delete", "/new", "/keywords", "/keyword", "/export", "/help",
    "/quit",
];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Truncates a question for the history list, matching the sidebar style.
fn truncate_question(question: &str) -> String {
    if question.chars().count() > 40 {
        let short: String = question.chars().take(40).collect();
        format!("{short}...")
    } else {
        question.to_string()
    }
}

/// Prints the selected entry, with recognized links highlighted.
fn print_selection(entry: &QAEntry) {
    println!("{} {}", "Q:".bright_green().bold(), entry.question);
    print!("{} ", "A:".bright_green().bold());
    for span in sanitize::scan(&entry.answer) {
        match span {
            AnswerSpan::Text(text) => print!("{text}"),
            AnswerSpan::Link { label, url } => {
                print!("{} ({})", label.bright_blue().underline(), url.bright_blue());
            }
        }
    }
    println!();
}

async fn print_history(session: &QuerySession) {
    let history = session.history().await;
    if history.is_empty() {
        println!("{}", "No questions asked yet.".dimmed());
        return;
    }
    for (i, entry) in history.iter().enumerate() {
        println!(
            "{:>3}. {}",
            i + 1,
            truncate_question(&entry.question).bright_blue()
        );
    }
}

fn print_help() {
    println!("Ask a question by typing it, or use a command:");
    println!("  /dept <name>    switch department ({})",
        Department::all()
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", "));
    println!("  /history        list past questions");
    println!("  /open <n>       reopen a past question");
    println!("  /delete <n>     delete a past question");
    println!("  /new            dismiss the current answer (ask another)");
    println!("  /keywords       show suggested question starters");
    println!("  /keyword <n>    append a suggested starter to your question");
    println!("  /export <path>  write the current answer as an HTML snippet");
    println!("  /quit           exit");
}

/// Parses a 1-based list position as shown by /history.
fn parse_position(arg: &str) -> Option<usize> {
    arg.trim().parse::<usize>().ok().filter(|n| *n > 0).map(|n| n - 1)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // ===== Backend Initialization =====
    let history = Arc::new(JsonHistoryRepository::new_default()?);
    let selection = Arc::new(JsonSelectionRepository::new_default()?);
    let agent = Arc::new(QaApiAgent::try_from_config()?);
    let session = QuerySession::new(history, selection, agent);

    let mut department = Department::default();
    let mut pending = String::new();

    let mut editor: Editor<CliHelper, rustyline::history::DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(CliHelper::new()));

    println!("{}", "College Info Bot".bright_green().bold());
    println!("{}", "Type /help for commands.".dimmed());
    if let Some(entry) = session.selection().await {
        print_selection(&entry);
    }

    loop {
        let prompt = format!("{department}> ");
        let initial = std::mem::take(&mut pending);
        let line = match editor.readline_with_initial(&prompt, (&initial, "")) {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{} {err}", "Input error:".red());
                break;
            }
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(input);

        if let Some(command) = input.strip_prefix('/') {
            let (name, arg) = match command.split_once(' ') {
                Some((name, arg)) => (name, arg.trim()),
                None => (command, ""),
            };
            match name {
                "quit" | "exit" => break,
                "help" => print_help(),
                "dept" => match arg.parse::<Department>() {
                    Ok(dept) => {
                        department = dept;
                        println!("Department set to {}", department.to_string().bright_green());
                    }
                    Err(_) => eprintln!("{} unknown department {arg:?}", "Error:".red()),
                },
                "history" => print_history(&session).await,
                "open" => match parse_position(arg) {
                    Some(index) => {
                        let entries = session.history().await;
                        match entries.get(index) {
                            Some(entry) => {
                                session.select_from_history(entry).await?;
                                print_selection(entry);
                                // Pre-fill the next prompt, like clicking a
                                // history item refills the input box.
                                pending = entry.question.clone();
                            }
                            None => eprintln!("{} no such entry", "Error:".red()),
                        }
                    }
                    None => eprintln!("{} usage: /open <n>", "Error:".red()),
                },
                "delete" => match parse_position(arg) {
                    Some(index) => match session.delete_from_history(index).await {
                        Ok(removed) => {
                            println!("Deleted {:?}", truncate_question(&removed.question));
                        }
                        Err(err) => eprintln!("{} {err}", "Error:".red()),
                    },
                    None => eprintln!("{} usage: /delete <n>", "Error:".red()),
                },
                "new" => {
                    session.dismiss_selection().await?;
                    println!("{}", "Ready for another question.".dimmed());
                }
                "keywords" => {
                    println!("{}", "Try asking about:".dimmed());
                    for (i, keyword) in SUGGESTED_KEYWORDS.iter().enumerate() {
                        println!("{:>3}. {keyword}", i + 1);
                    }
                }
                "keyword" => match parse_position(arg).and_then(|i| SUGGESTED_KEYWORDS.get(i)) {
                    Some(keyword) => pending = keyword.to_string(),
                    None => eprintln!("{} usage: /keyword <n>", "Error:".red()),
                },
                "export" => {
                    if arg.is_empty() {
                        eprintln!("{} usage: /export <path>", "Error:".red());
                    } else if let Some(entry) = session.selection().await {
                        let markup = sanitize::render(&entry.answer);
                        std::fs::write(arg, markup.as_str())?;
                        println!("Wrote {arg}");
                    } else {
                        eprintln!("{} nothing selected", "Error:".red());
                    }
                }
                _ => eprintln!("{} unknown command /{name}", "Error:".red()),
            }
            continue;
        }

        // Anything else is a question for the remote service.
        println!("{}", "Thinking...".dimmed());
        match session.ask(input, department).await? {
            AskOutcome::Answered(entry) => print_selection(&entry),
            AskOutcome::Ignored => {}
            AskOutcome::Busy => {
                eprintln!("{}", "Still thinking about the last question.".yellow())
            }
        }
    }

    Ok(())
}

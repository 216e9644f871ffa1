//! Terminal UI helpers

use anyhow::Result;
use colored::*;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use std::io::{self, IsTerminal, Write};

use tweetrag_core::{Error, IndexingReport};

const PROMPT: &str = "tweetrag>";

/// Display startup banner
pub fn display_banner(project_name: &str, documents: usize) {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let width = terminal_width.saturating_sub(4).clamp(40, 60);
    let border = "─".repeat(width - 2);

    println!();
    println!("{}", format!("┌{}┐", border).blue());
    for line in [
        project_name.to_string(),
        String::new(),
        format!("{} tweets indexed", documents),
        "Ask a question about them, or 'help' for commands".to_string(),
    ] {
        let padding = (width - 4).saturating_sub(line.chars().count());
        println!("{}", format!("│ {}{} │", line, " ".repeat(padding)).blue());
    }
    println!("{}", format!("└{}┘", border).blue());
    println!();
}

/// Display help message
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {} - Ask anything about the indexed tweets", "<question>".green());
    println!("  {} - Re-read the upload directory and rebuild the index", "reindex".green());
    println!("  {} - Show how many tweets are indexed", "count".green());
    println!("  {} - Show this help message", "help".green());
    println!("  {} - Exit the application", "exit/quit".green());
}

pub fn print_report(report: &IndexingReport) {
    println!(
        "{} Indexed {} tweets ({} bytes)",
        "✅".green(),
        report.documents_indexed,
        report.total_bytes
    );
}

pub fn print_answer(answer: &str) {
    println!("{} {}", "→".green(), answer);
}

/// Report a failure, naming its kind when it came from the pipeline
pub fn print_error(context: &str, err: &anyhow::Error) {
    println!("{} {} [{}]: {:#}", "❌".red(), context, error_label(err).yellow(), err);
}

fn error_label(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<Error>().map(Error::kind) {
        Some("malformed_input") => "bad tweet file",
        Some("embedding_failed") | Some("generation_failed") => "provider unavailable",
        Some("invalid_dimension") => "embedding dimension mismatch",
        Some(kind) => kind,
        None => "error",
    }
}

/// Ctrl-C and Ctrl-D end the session while the terminal is in raw mode
fn is_interrupt(key_event: &KeyEvent) -> bool {
    key_event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('d'))
}

/// Read one line, with ↑/↓ history when attached to a terminal
pub fn read_input(history: &mut Vec<String>) -> Result<String> {
    if !io::stdin().is_terminal() {
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok("exit".to_string());
        }
        return Ok(input.trim().to_string());
    }

    print!("{} ", PROMPT.green().bold());
    io::stdout().flush()?;

    enable_raw_mode()?;
    let result = read_raw_line(history);
    disable_raw_mode()?;
    println!();

    let input = result?;
    if !input.is_empty() {
        history.push(input.clone());
    }
    Ok(input)
}

fn read_raw_line(history: &[String]) -> Result<String> {
    let mut input = String::new();
    let mut history_index: Option<usize> = None;

    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };

        if is_interrupt(&key_event) {
            return Ok("exit".to_string());
        }

        match key_event.code {
            KeyCode::Enter => return Ok(input.trim().to_string()),
            KeyCode::Esc => return Ok(String::new()),
            KeyCode::Char(c) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Up if !history.is_empty() => {
                let index = history_index.map_or(history.len() - 1, |i| i.saturating_sub(1));
                history_index = Some(index);
                input = history[index].clone();
            }
            KeyCode::Down => match history_index {
                Some(i) if i + 1 < history.len() => {
                    history_index = Some(i + 1);
                    input = history[i + 1].clone();
                }
                _ => {
                    history_index = None;
                    input.clear();
                }
            },
            _ => continue,
        }

        redraw(&input)?;
    }
}

fn redraw(input: &str) -> Result<()> {
    let width = size().map(|(w, _)| w as usize).unwrap_or(80);
    print!("\r{}\r{} {}", " ".repeat(width.saturating_sub(1)), PROMPT.green().bold(), input);
    io::stdout().flush()?;
    Ok(())
}

//! Terminal confirmation prompt
//!
//! Lists the candidate classes, all pre-selected. Enter accepts the list as
//! shown, a comma-separated list of numbers accepts a subset, `q` (or end of
//! input) dismisses.

use colored::*;
use phpaccess_gen::{Picker, SelectionRequest};
use std::io::{BufRead, Write};

/// What the operator typed
#[derive(Debug, PartialEq, Eq)]
enum Answer {
    AcceptPicked,
    Accept(Vec<usize>),
    Dismiss,
    Invalid,
}

fn parse_answer(line: &str, item_count: usize) -> Answer {
    let line = line.trim();
    if line.is_empty() {
        return Answer::AcceptPicked;
    }
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Answer::Dismiss;
    }

    let mut chosen = Vec::new();
    for part in line.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.parse::<usize>() {
            Ok(n) if (1..=item_count).contains(&n) => {
                if !chosen.contains(&(n - 1)) {
                    chosen.push(n - 1);
                }
            }
            _ => return Answer::Invalid,
        }
    }
    Answer::Accept(chosen)
}

/// Prompts on a terminal-like reader/writer pair
pub struct TerminalPicker<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, request: &SelectionRequest) -> std::io::Result<Answer> {
        writeln!(self.output, "{}", request.title.bold())?;
        for (i, item) in request.items.iter().enumerate() {
            let mark = if item.picked { "[x]" } else { "[ ]" };
            writeln!(self.output, "  {} {} {}", format!("{:>2}.", i + 1).dimmed(), mark, item.label)?;
        }

        loop {
            write!(
                self.output,
                "Enter to accept, numbers (e.g. 1,3) to choose, q to cancel: "
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(Answer::Dismiss);
            }

            match parse_answer(&line, request.items.len()) {
                Answer::Invalid => {
                    writeln!(self.output, "{}", "Invalid selection".yellow())?;
                }
                answer => return Ok(answer),
            }
        }
    }
}

impl<R: BufRead, W: Write> Picker for TerminalPicker<R, W> {
    fn present(&mut self, request: SelectionRequest) {
        // an unreadable terminal counts as dismissal
        let answer = self.prompt(&request).unwrap_or(Answer::Dismiss);

        match answer {
            Answer::AcceptPicked => request.accept_picked(),
            Answer::Accept(indices) => {
                let labels = indices
                    .into_iter()
                    .filter_map(|i| request.items.get(i).map(|item| item.label.clone()))
                    .collect();
                request.accept(labels);
            }
            Answer::Dismiss | Answer::Invalid => request.dismiss(),
        }
    }
}

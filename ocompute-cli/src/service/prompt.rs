//! Interactive confirmation

use std::io::{self, BufRead, Write};

/// Asks the operator before a destructive call
pub trait Confirm {
    /// Returns `true` if the operator agreed
    fn confirm(&self, question: &str) -> io::Result<bool>;
}

/// Reads a yes/no answer from standard input
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, question: &str) -> io::Result<bool> {
        print!("{}? (Y/N) ", question);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;

        Ok(is_yes(&input))
    }
}

/// Agrees to everything (`--yes`)
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _question: &str) -> io::Result<bool> {
        Ok(true)
    }
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

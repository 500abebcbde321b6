//! Interactive confirmation on the terminal.

use std::io::{self, BufRead, Write};

use recordmaster_core::ConfirmPrompt;

/// Asks on stdin before each mutation; anything but `y`/`yes` declines.
pub struct StdinPrompt;

impl ConfirmPrompt for StdinPrompt {
    fn confirm(&self, prompt: &str) -> bool {
        print!("About to {prompt}. Apply? [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        let answer = answer.trim();
        answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
    }
}

use colored::*;
use std::io::{BufRead, Write};
use std::path::Path;
use zipsplit_core::Prompt;
use zipsplit_core::error::Result;

/// Asks on the terminal before an existing archive is replaced.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        print!(
            "{} exists already, delete? (y/n) ",
            path.display().to_string().yellow()
        );
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(is_yes(&line))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "yes")
}

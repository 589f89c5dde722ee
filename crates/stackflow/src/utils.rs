use std::io::{self, BufRead, Write};

/// Interactive yes/no confirmation; `force` skips the prompt
///
/// Anything other than an explicit yes declines.
pub fn confirm(prompt: &str, force: bool) -> bool {
    if force {
        return true;
    }

    print!("{} [y/N]: ", prompt);
    let _ = io::stdout().flush();

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }

    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

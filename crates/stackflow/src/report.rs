//! Stack output reporting
//!
//! Printing is a side effect only; nothing downstream depends on it
//! succeeding.

use colored::Colorize;
use stackflow_aws::StackOutputEntry;

/// Print all declared outputs as a key/value table in stable (sorted) order
pub fn print_outputs(outputs: &[StackOutputEntry]) {
    if outputs.is_empty() {
        println!("  ⚠ Stack declared no outputs");
        return;
    }

    let mut sorted: Vec<&StackOutputEntry> = outputs.iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));

    let width = sorted.iter().map(|o| o.key.len()).max().unwrap_or(0);
    for output in sorted {
        // Pad before colouring; ANSI escapes would break the column width.
        println!("  {}  {}", format!("{:width$}", output.key).cyan(), output.value);
    }
}

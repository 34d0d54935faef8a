//! Statistics reporting.

use std::path::Path;

use console::style;

use crate::download::Summary;

/// Print the end-of-run statistics.
pub fn print_summary(summary: &Summary, course_dir: &Path) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Download Summary:").bold());
    println!("  Directory:  {}", course_dir.display());
    println!("  Tasks:      {}", summary.total);
    println!("  Downloaded: {}", style(summary.downloaded).green());
    println!("  Skipped:    {} (already on disk)", style(summary.skipped).yellow());
    if summary.failed > 0 {
        println!("  Failed:     {}", style(summary.failed).red());
    }
    println!("  Inline:     {} lesson bodies written", summary.inline_written);
    println!("{}", style("═".repeat(50)).dim());
}

//! Console output utilities.

use console::style;

use crate::download::Outcome;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Course Mirror                                     ║
║     Mirror online course trees to disk                ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(platform: &str, course: &str, download_dir: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Platform: {}", platform);
    println!("  Course: {}", course);
    println!("  Directory: {}", download_dir);
    println!();
}

/// Format the completion line of one task, e.g. `[3/10] ✔ 0_Intro/1_Setup`.
pub fn format_task_result(settled: usize, total: usize, label: &str, outcome: &Outcome) -> String {
    let counter = style(format!("[{}/{}]", settled, total)).dim();
    match outcome {
        Outcome::Downloaded => format!("{} {} {}", counter, style("✔").green(), label),
        Outcome::Skipped => format!(
            "{} {} {} {}",
            counter,
            style("✔").green(),
            label,
            style("(already exists)").dim()
        ),
        Outcome::Failed(reason) => format!(
            "{} {} {} {}",
            counter,
            style("✘").red(),
            label,
            style(reason).red()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_task_result() {
        console::set_colors_enabled(false);

        assert_eq!(
            format_task_result(3, 10, "0_a/1_b", &Outcome::Downloaded),
            "[3/10] ✔ 0_a/1_b"
        );
        assert_eq!(
            format_task_result(1, 2, "x", &Outcome::Skipped),
            "[1/2] ✔ x (already exists)"
        );
        assert_eq!(
            format_task_result(2, 2, "x", &Outcome::Failed("HTTP 404".into())),
            "[2/2] ✘ x HTTP 404"
        );
    }
}

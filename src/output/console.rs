//! Console output utilities.
//!
//! Everything here writes to stderr; stdout is reserved for the
//! collected link records.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    eprintln!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Reddit Harvester                                  ║
║     Media link collector for posts and comments       ║
╚═══════════════════════════════════════════════════════╝
"#;
    eprintln!("{}", style(banner).cyan());
}

/// Print run configuration summary.
pub fn print_run_summary(targets: &[String], comments: u32, recursion: u32, format: &str) {
    eprintln!();
    eprintln!("{}", style("Configuration:").bold());
    eprintln!("  Targets:   {}", targets.join(", "));
    eprintln!("  Comments:  {}", comments);
    eprintln!("  Recursion: {}", recursion);
    eprintln!("  Format:    {}", format);
    eprintln!();
}

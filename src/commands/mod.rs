mod config_cmd;
mod planner;
mod quotes;

use clap::ValueEnum;

pub use config_cmd::ConfigCommand;
pub use planner::PlannerCommand;
pub use quotes::QuoteCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Truncates `s` to `width` characters for table output.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let cut: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("this is far too long", 10), "this is...");
        assert_eq!(truncate("ééééééééééé", 5), "éé...");
    }
}

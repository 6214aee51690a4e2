use clap::Parser;
use std::path::PathBuf;

// https://stackoverflow.com/questions/74068168/clap-rs-not-printing-colors-during-help
fn get_styles() -> clap::builder::Styles {
    let cyan = anstyle::Color::Ansi(anstyle::AnsiColor::Cyan);
    let green = anstyle::Color::Ansi(anstyle::AnsiColor::Green);
    let yellow = anstyle::Color::Ansi(anstyle::AnsiColor::Yellow);

    clap::builder::Styles::styled()
        .placeholder(anstyle::Style::new().fg_color(Some(yellow)))
        .usage(anstyle::Style::new().fg_color(Some(cyan)).bold())
        .header(
            anstyle::Style::new()
                .fg_color(Some(cyan))
                .bold()
                .underline(),
        )
        .literal(anstyle::Style::new().fg_color(Some(green)))
}

// https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template
const APPLET_TEMPLATE: &str = "\
{before-help}
{about-with-newline}
{usage-heading} {usage}

{all-args}
{after-help}";

const EX1: &str = r#" csv-view"#;
const EX2: &str = r#" csv-view data.csv"#;
const EX3: &str = r#" csv-view --show-tooltips data.csv"#;

/// Command-line arguments for the CSV View application.
#[derive(Parser, Debug, Clone)]
#[command(
    // Read from `Cargo.toml`.
    author, version, about,
    long_about = None,
    next_line_help = true,
    help_template = APPLET_TEMPLATE,
    styles=get_styles(),
    after_help = format!("EXAMPLES:\n{EX1}\n{EX2}\n{EX3}")
)]
pub struct Arguments {
    /// Optional path to the CSV file to load on startup.
    #[arg(
        value_name = "FILE_PATH",
        default_value = ".",
        required = false,
        help = "Path to a CSV file [Optional]",
        long_help = "Path to the input CSV file.\n\
        If omitted, opens the UI to load a file manually (button or drag-drop)."
    )]
    pub path: PathBuf,

    /// Start with cell tooltips enabled.
    #[arg(
        short = 's',
        long = "show-tooltips",
        help = "Start with cell tooltips enabled",
        long_help = "If present, the \"Show Tooltip\" checkbox starts checked,\n\
        so hovering a long cell value shows a floating tooltip.",
        action = clap::ArgAction::SetTrue
    )]
    pub show_tooltips: bool,
}

impl Arguments {
    /// Build `Arguments` struct.
    pub fn build() -> Arguments {
        Arguments::parse()
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_args`
#[cfg(test)]
mod tests_args {
    use super::*;
    use std::path::PathBuf;

    // Helper to create a dummy PathBuf for testing command line parsing.
    // clap doesn't need the file to exist for basic parsing tests.
    fn test_path(name: &str) -> PathBuf {
        PathBuf::from(name)
    }

    #[test]
    fn test_args_basic_path_only() {
        let path_str = "data.csv";
        let args = Arguments::parse_from(["csv-view", path_str]);

        assert_eq!(args.path, test_path(path_str));
        // Check defaults
        assert!(!args.show_tooltips); // Flag defaults to false
    }

    #[test]
    fn test_args_no_path_provided_uses_default() {
        // No path provided, clap should use the default_value "."
        let args = Arguments::parse_from(["csv-view"]); // Use default path "."

        assert_eq!(args.path, test_path("."));
        assert!(!args.show_tooltips);
    }

    #[test]
    fn test_args_show_tooltips_short() {
        let path_str = "metrics.csv";
        let args = Arguments::parse_from(["csv-view", "-s", path_str]);

        assert_eq!(args.path, test_path(path_str));
        assert!(args.show_tooltips); // Flag sets it to true
    }

    #[test]
    fn test_args_show_tooltips_long() {
        let args = Arguments::parse_from(["csv-view", "--show-tooltips"]);

        assert_eq!(args.path, test_path("."));
        assert!(args.show_tooltips);
    }
}

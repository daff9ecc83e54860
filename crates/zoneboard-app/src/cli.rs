#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via the `ZONEBOARD_*` prefix.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
zoneboard — terminal multi-timezone clock and converter

USAGE:
    zoneboard [OPTIONS]

OPTIONS:
    --date=YYYY-MM-DD    Reference date (default: today)
    --zone=IANA          Track an extra timezone (repeatable)
    --prefs=PATH         Preference file path (default: config dir)
    --theme=MODE         Start in 'dark' or 'light', overriding the
                         stored preference for this run
    --no-mouse           Disable mouse event capture
    --exit-after-ms=N    Auto-quit after N milliseconds (for testing)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Up/Down, Home/End    Select a zone row
    Space                Grab the selected row; Up/Down then move it
    Left/Right           Nudge the selected zone by 15 minutes
    Shift+Left/Right     Nudge by one hour
    Enter / e            Type an exact time (HH:mm) for the row
    a                    Add a timezone (searchable picker)
    x / Delete           Remove the selected row
    d                    Set the reference date; [ / ] step one day
    r                    Reverse the display order
    s                    Toggle the share strip
    t                    Toggle dark mode (persisted)
    b                    Open the calendar booking link
    ?                    Help overlay
    q / Ctrl+C           Quit

ENVIRONMENT VARIABLES:
    ZONEBOARD_DATE            Override --date
    ZONEBOARD_PREFS           Override --prefs
    ZONEBOARD_THEME           Override --theme (dark|light)
    ZONEBOARD_EXIT_AFTER_MS   Override --exit-after-ms
    ZONEBOARD_LOG             Log filter; enables file logging
    ZONEBOARD_LOG_FILE        Log file path (default: zoneboard.log)";

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct Opts {
    /// Reference date as given (`YYYY-MM-DD`), if any.
    pub date: Option<String>,
    /// Extra timezones to track at startup.
    pub zones: Vec<String>,
    /// Preference file path override.
    pub prefs_path: Option<PathBuf>,
    /// Theme override for this run (`dark` or `light`).
    pub theme: Option<String>,
    /// Whether mouse events are enabled.
    pub mouse: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            date: None,
            zones: Vec::new(),
            prefs_path: None,
            theme: None,
            mouse: true,
            exit_after_ms: 0,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are
    /// overridden by explicit command-line flags.
    pub fn parse() -> Self {
        Self::parse_from(env::args().skip(1))
    }

    fn parse_from(args: impl Iterator<Item = String>) -> Self {
        let mut opts = Self::default();

        if let Ok(val) = env::var("ZONEBOARD_DATE") {
            opts.date = Some(val);
        }
        if let Ok(val) = env::var("ZONEBOARD_PREFS") {
            opts.prefs_path = Some(PathBuf::from(val));
        }
        if let Ok(val) = env::var("ZONEBOARD_THEME") {
            opts.theme = Some(val);
        }
        if let Ok(val) = env::var("ZONEBOARD_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("zoneboard {VERSION}");
                    process::exit(0);
                }
                "--no-mouse" => {
                    opts.mouse = false;
                }
                other => {
                    if let Some(val) = other.strip_prefix("--date=") {
                        opts.date = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--zone=") {
                        opts.zones.push(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--prefs=") {
                        opts.prefs_path = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--theme=") {
                        opts.theme = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        match val.parse() {
                            Ok(n) => opts.exit_after_ms = n,
                            Err(_) => {
                                eprintln!("Invalid --exit-after-ms value: {val}");
                                process::exit(1);
                            }
                        }
                    } else {
                        eprintln!("Unknown argument: {other}");
                        eprintln!("Run with --help for usage information.");
                        process::exit(1);
                    }
                }
            }
        }

        opts
    }
}

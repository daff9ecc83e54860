#![forbid(unsafe_code)]

//! zoneboard binary entry point.

use std::env;
use std::process;
use std::time::Duration;

use tracing::warn;
use zoneboard_app::cli;
use zoneboard_app::{AppModel, AppOptions};
use zoneboard_tui::{FilePrefs, Program, ProgramConfig};

fn main() {
    let opts = cli::Opts::parse();
    init_logging();

    let prefs_path = opts
        .prefs_path
        .clone()
        .unwrap_or_else(FilePrefs::default_path);
    let prefs = Box::new(FilePrefs::new(prefs_path));

    let date = opts.date.as_deref().and_then(|s| match s.parse() {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(input = s, error = %e, "ignoring unparsable --date");
            None
        }
    });
    let dark_override = opts.theme.as_deref().and_then(|mode| match mode {
        "dark" => Some(true),
        "light" => Some(false),
        other => {
            warn!(theme = other, "ignoring unknown --theme");
            None
        }
    });

    let model = AppModel::with_options(
        prefs,
        AppOptions {
            date,
            extra_zones: opts.zones.clone(),
            dark_override,
        },
    );

    let config = ProgramConfig {
        mouse: opts.mouse,
        exit_after: (opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms)),
        ..ProgramConfig::default()
    };

    if let Err(e) = Program::with_config(model, config).run() {
        eprintln!("Runtime error: {e}");
        process::exit(1);
    }
}

/// Install a file-backed subscriber when `ZONEBOARD_LOG` is set.
///
/// Logs go to a file, never stdout: the terminal is in raw mode and shared
/// with the renderer.
fn init_logging() {
    let Ok(filter) = env::var("ZONEBOARD_LOG") else {
        return;
    };
    let path = env::var("ZONEBOARD_LOG_FILE").unwrap_or_else(|_| "zoneboard.log".into());
    match std::fs::File::create(&path) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(e) => eprintln!("cannot open log file {path}: {e}"),
    }
}

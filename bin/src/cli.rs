use autoscroll::SpeedAlgorithm;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Drive the autoscroll gesture engine from the command line.
#[derive(Debug, Parser)]
#[command(name = "autoscroll", version)]
pub struct Cli {
    /// Log file path. A path with an extension names the file, otherwise the directory.
    #[arg(long, global = true, env = "AUTOSCROLL_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Settings file. Defaults to `<config dir>/autoscroll/settings.toml` when present.
    #[arg(long, global = true, env = "AUTOSCROLL_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay an input trace against a simulated scroll view
    Replay {
        /// Trace file, one timestamped event per line
        trace: PathBuf,
    },

    /// Print the velocity a speed curve assigns to each displacement
    Speed {
        /// Speed curve, `gecko` or `quadratic`. Defaults to the configured one.
        #[arg(short, long)]
        algorithm: Option<SpeedAlgorithm>,

        /// First displacement in pixels
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        from: i32,

        /// Last displacement in pixels
        #[arg(long, default_value_t = 200, allow_negative_numbers = true)]
        to: i32,

        /// Displacement increment
        #[arg(long, default_value_t = 10)]
        step: u32,

        /// Display scale factor. Defaults to the configured one.
        #[arg(long)]
        scale: Option<f32>,
    },
}

/// `<config dir>/autoscroll/settings.toml`, if such a file exists.
pub fn discovered_settings_path() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("autoscroll").join("settings.toml");
    path.is_file().then_some(path)
}

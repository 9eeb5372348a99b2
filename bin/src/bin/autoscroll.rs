use autoscroll::Settings;
use autoscroll_bin::{
    cli::{self, Cli, Command},
    commands::{self, speed::SpeedTable},
};
use autoscroll_log::LogConfig;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    let _log_guard = match autoscroll_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    }) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {e}");
            None
        },
    };

    let discovered = cli::discovered_settings_path();
    let settings = Settings::load_with_overrides(cli.settings.as_deref(), discovered.as_deref())
        .unwrap_or_else(|e| {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        });
    tracing::debug!(?settings, "Loaded settings");

    let result = match cli.command {
        Command::Replay { trace } => commands::replay::run(&trace, settings),
        Command::Speed {
            algorithm,
            from,
            to,
            step,
            scale,
        } => commands::speed::run(SpeedTable {
            algorithm: algorithm.unwrap_or(settings.speed),
            from,
            to,
            step,
            display_scale: scale.unwrap_or(settings.display_scale),
        }),
    };

    if let Err(e) = result {
        tracing::error!("{e:#}");
        eprintln!("Command failed: {e:#}");
        std::process::exit(1);
    }
}

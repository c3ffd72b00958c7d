use clap::{value_parser, Arg, Command};
use log::{error, info};
use simplelog::{
    format_description, ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::Path;
use std::process;

use run_admittance_controller::application;
use run_admittance_controller::constants::DEFAULT_PARAMETER_FILE;

fn main() {
    // Parse the command line arguments
    let matches = Command::new("admittance controller")
        .about("Admittance controller of the coupled platform-arm system.")
        .arg(
            Arg::new("params")
                .short('p')
                .long("params")
                .help("Path to the YAML parameter file.")
                .default_value(DEFAULT_PARAMETER_FILE),
        )
        .arg(
            Arg::new("level")
                .short('l')
                .long("log-level")
                .help("Log level: 0 (Off), 1 (Error), 2 (Warn), 3 (Info), 4 (Debug), 5 (Trace)")
                .default_value("3")
                .value_parser(value_parser!(u32)),
        )
        .get_matches();

    // Check the parameter file
    let filepath = matches
        .get_one::<String>("params")
        .expect("There should be the parameter file path.");

    // Check the log filter
    let log_filter = get_log_filter(matches.get_one::<u32>("level"));

    // Initiate the logger
    initiate_logger(log_filter, "admittance_controller.log");
    info!("Log level: {log_filter}.");

    // Run the node. The first missing or malformed parameter is fatal: a
    // controller with unset dynamic coefficients must never start.
    if let Err(error) = application::run(Path::new(filepath)) {
        error!("{error}.");
        process::exit(1);
    }
}

/// Get the log filter.
///
/// # Arguments
/// * `log_level` - Log level.
///
/// # Returns
/// Log filter.
fn get_log_filter(log_level: Option<&u32>) -> LevelFilter {
    match log_level {
        Some(level) => match level {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            5 => LevelFilter::Trace,
            _ => LevelFilter::Info,
        },
        None => LevelFilter::Info,
    }
}

/// Initiate the logger.
///
/// # Arguments
/// * `level` - Log level.
/// * `filepath` - Log file path.
fn initiate_logger(level: LevelFilter, filepath: &str) {
    let config = ConfigBuilder::new()
        .set_time_format_custom(format_description!(
            "[year]/[month]/[day] [hour]:[minute]:[second].[subsecond]"
        ))
        .build();

    // Log to the terminal
    let logger_terminal = TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    // Log to the file
    let logger_file: Option<Box<WriteLogger<File>>>;
    match File::create(filepath) {
        Ok(file) => {
            logger_file = Some(WriteLogger::new(level, config.clone(), file));
        }
        Err(error) => {
            logger_file = None;
            eprintln!("Failed to create the log file: {error}.");
        }
    }

    if logger_file.is_some() {
        let _ = CombinedLogger::init(vec![logger_terminal, logger_file.unwrap()]);
    } else {
        let _ = CombinedLogger::init(vec![logger_terminal]);
    }
}

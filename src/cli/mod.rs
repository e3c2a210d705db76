//! Command-line interface for backdrop.
//!
//! This module handles CLI argument parsing and the offline subcommands.
//! Subcommand implementations live in the [`commands`] submodule.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// backdrop - GPU shader backgrounds for terminal emulators
#[derive(Parser, Debug)]
#[command(name = "backdrop")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of ~/.config/backdrop/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set log level (overrides RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,

    /// Background shader to preview (filename from shaders directory or path)
    #[arg(long, value_name = "SHADER")]
    pub shader: Option<String>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile and validate a shader without opening a window
    Check {
        /// Shader file (.glsl, .frag, .fs or .wgsl)
        path: PathBuf,

        /// Compile against the touch-enabled uniform block
        #[arg(long)]
        touches: bool,
    },

    /// Print the WGSL generated for a shader
    Wgsl {
        /// Shader file (.glsl, .frag, .fs or .wgsl)
        path: PathBuf,

        /// Compile against the touch-enabled uniform block
        #[arg(long)]
        touches: bool,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the uniform block layout and the aliases it resolves
    Layout {
        /// Show the touch-enabled uniform block
        #[arg(long)]
        touches: bool,
    },
}

/// Runtime options passed from CLI to the preview window
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Config file override
    pub config: Option<PathBuf>,
    /// Background shader override
    pub shader: Option<String>,
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with the preview window
    Continue(RuntimeOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Process CLI arguments, initialize logging and handle subcommands
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();
    crate::logging::init(cli.log_level.map(|l| l.to_level_filter()));
    dispatch(cli)
}

fn dispatch(cli: Cli) -> CliResult {
    let result = match cli.command {
        Some(Commands::Check { path, touches }) => {
            commands::check_cli(&path, touches, cli.config.as_deref())
        }
        Some(Commands::Wgsl {
            path,
            touches,
            output,
        }) => commands::wgsl_cli(&path, touches, cli.config.as_deref(), output.as_deref()),
        Some(Commands::Layout { touches }) => {
            commands::layout_cli(touches);
            Ok(())
        }
        None => {
            return CliResult::Continue(RuntimeOptions {
                config: cli.config,
                shader: cli.shader,
            });
        }
    };

    match result {
        Ok(()) => CliResult::Exit(0),
        Err(e) => {
            eprintln!("backdrop: error: {e:#}");
            CliResult::Exit(1)
        }
    }
}

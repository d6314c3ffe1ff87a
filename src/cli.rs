//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{ConfigOverrides, ExportOverrides, WidgetOverrides};

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The `axes.prop_cycle` line
    #[default]
    Text,
    /// JSON object with the colors and the style line
    Json,
}

/// Color swatch palette editor with undo and matplotlib style export.
#[derive(Parser, Debug)]
#[command(name = "swatches")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Palette color in any CSS format (hex, rgb(), hsl(), named); repeat for more
    #[arg(
        short = 'c',
        long = "color",
        value_name = "COLOR",
        value_parser = |s: &str| s.parse::<csscolorparser::Color>().map(|_| s.to_string()).map_err(|e| e.to_string())
    )]
    pub colors: Vec<String>,

    /// Maximum number of undo steps kept
    #[arg(long, value_name = "N")]
    pub history_length: Option<usize>,

    /// Load configuration from TOML file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save current configuration to TOML file
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// Write a .mplstyle file with the color cycle
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Launch interactive TUI for editing the palette
    #[arg(short, long)]
    pub interactive: bool,

    /// Log file path (default: swatches.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error (default: info)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Generate shell completions for the specified shell
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    /// Settings given explicitly on the command line, for the top config layer.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            widget: WidgetOverrides {
                colors: (!self.colors.is_empty()).then(|| self.colors.clone()),
                history_length: self.history_length,
            },
            export: ExportOverrides {
                path: self.output.clone(),
            },
        }
    }
}

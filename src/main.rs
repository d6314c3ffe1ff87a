//! CLI entry point for swatches.

use std::io;

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr};

use swatches::cli::{Cli, OutputFormat};
use swatches::config::SwatchConfig;
use swatches::logging::init_logging;
use swatches::style::{StyleReport, mplstyle, prop_cycle};
use swatches::tui;
use swatches::widget::SwatchWidget;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "swatches", &mut io::stdout());
        return Ok(());
    }

    let _guard = (cli.interactive || cli.log_file.is_some())
        .then(|| init_logging(cli.log_file.as_deref(), Some(cli.log_level.as_str())));

    let config = SwatchConfig::load(cli.config.as_deref(), &cli.to_config_overrides())
        .wrap_err("Failed to load configuration")?;
    tracing::info!(?config, "Loaded configuration");

    if let Some(ref path) = cli.save_config {
        config
            .save(path)
            .wrap_err_with(|| format!("Failed to save config to {}", path.display()))?;
        eprintln!("Saved config to {}", path.display());
    }

    if cli.interactive {
        return tui::run(config);
    }

    let widget = SwatchWidget::with_options(config.widget.clone());
    let colors = widget.colors();

    match cli.format {
        OutputFormat::Text => println!("{}", prop_cycle(&colors)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&StyleReport::new(&colors))
                .wrap_err("Failed to serialize style to JSON")?;
            println!("{json}");
        }
    }

    if let Some(ref path) = cli.output {
        std::fs::write(path, mplstyle(&colors))
            .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;
        eprintln!("Wrote style to {}", path.display());
    }

    Ok(())
}

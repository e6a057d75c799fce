// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdfprint — list printers and print PDF files
//
// Entry point. Initialises logging, loads the config file and dispatches the
// subcommand against the system bridge.

mod cli;

use clap::Parser;

use pdfprint_core::config::{AppConfig, default_config_path};
use pdfprint_core::error::Result;
use pdfprint_print::PdfPrinter;

use cli::{Cli, Commands, PrintArgs};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = AppConfig::load(&config_path)?;
    tracing::debug!(path = %config_path.display(), "config loaded");

    let printer = match cli.platform {
        Some(platform) => PdfPrinter::new(pdfprint_bridge::system_bridge(), platform),
        None => PdfPrinter::system(),
    };
    tracing::debug!(platform = ?printer.platform(), "printer ready");

    match cli.command {
        Commands::List => {
            for name in printer.list_printers().await? {
                println!("{name}");
            }
        }
        Commands::Default => {
            println!("{}", printer.default_printer().await?);
        }
        Commands::Print(args) => print(&printer, &config, &args).await?,
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

async fn print(printer: &PdfPrinter, config: &AppConfig, args: &PrintArgs) -> Result<()> {
    // The file is checked before `--options` is read or validated.
    printer.check_file(&args.file)?;
    let options = config.apply_to(args.to_options()?);

    if args.dry_run {
        println!("{}", printer.prepare(&args.file, &options)?);
        return Ok(());
    }

    let output = printer.print_file(&args.file, &options).await?;
    let output = output.trim();
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

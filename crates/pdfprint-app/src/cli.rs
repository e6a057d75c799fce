// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line parsing.
//
// Flags are turned into the same `PrintOptions` a library caller would pass,
// layered as: options file, then flags, then config defaults for anything
// still unset.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;

use pdfprint_core::error::Result;
use pdfprint_core::types::{
    ColorMode, Orientation, PageSubset, Platform, PrintOptions, PrintSettings, Scale, Side,
};

#[derive(Debug, Parser)]
#[command(name = "pdfprint", version)]
#[command(about = "List printers and print PDF files through the platform print tools")]
pub struct Cli {
    /// Config file (defaults to <data dir>/pdfprint/config.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Drive the tools of another platform (windows or unix)
    #[arg(long, global = true, value_parser = keyword::<Platform>)]
    pub platform: Option<Platform>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every installed printer, one per line
    List,
    /// Show the default printer (empty line when none is set)
    Default,
    /// Print a PDF file
    Print(PrintArgs),
    /// Show the effective configuration as JSON
    Config,
}

#[derive(Debug, Args)]
pub struct PrintArgs {
    /// PDF file to print
    pub file: PathBuf,

    /// Target printer; the OS default when omitted
    #[arg(short, long)]
    pub printer: Option<String>,

    /// SumatraPDF executable to use instead of the bundled one
    #[arg(long, value_name = "PATH")]
    pub sumatra_path: Option<PathBuf>,

    /// Raw SumatraPDF arguments (repeatable, quotes group tokens)
    #[arg(long = "win32", value_name = "ARGS", allow_hyphen_values = true)]
    pub win32: Vec<String>,

    /// Raw lp arguments (repeatable, quotes group tokens)
    #[arg(long = "unix", value_name = "ARGS", allow_hyphen_values = true)]
    pub unix: Vec<String>,

    /// JSON file holding print options
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Page ranges, e.g. 1-3,5
    #[arg(long)]
    pub pages: Option<String>,

    /// Only odd or even pages
    #[arg(long, value_parser = keyword::<PageSubset>)]
    pub subset: Option<PageSubset>,

    #[arg(long, value_parser = keyword::<Orientation>)]
    pub orientation: Option<Orientation>,

    /// noscale, shrink or fit
    #[arg(long, value_parser = keyword::<Scale>)]
    pub scale: Option<Scale>,

    #[arg(long)]
    pub monochrome: bool,

    /// simplex, duplex, duplexshort or duplexlong
    #[arg(long, value_parser = keyword::<Side>)]
    pub side: Option<Side>,

    /// Paper size name, e.g. A4
    #[arg(long)]
    pub paper: Option<String>,

    /// Paper tray
    #[arg(long)]
    pub bin: Option<String>,

    #[arg(long)]
    pub copies: Option<u32>,

    /// Show the command instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

impl PrintArgs {
    /// Options from `--options`, overridden by the individual flags.
    pub fn to_options(&self) -> Result<PrintOptions> {
        let mut options = match &self.options {
            Some(path) => load_options(path)?,
            None => PrintOptions::default(),
        };

        if self.printer.is_some() {
            options.printer = self.printer.clone();
        }
        if self.sumatra_path.is_some() {
            options.sumatra_pdf_path = self.sumatra_path.clone();
        }
        extend(&mut options.win32, &self.win32);
        extend(&mut options.unix, &self.unix);

        let flags = self.settings();
        if !flags.is_empty() {
            let base = options.settings.take().unwrap_or_default();
            options.settings = Some(overlay(base, flags));
        }
        Ok(options)
    }

    fn settings(&self) -> PrintSettings {
        PrintSettings {
            pages: self.pages.clone(),
            subset: self.subset,
            orientation: self.orientation,
            scale: self.scale,
            color: self.monochrome.then_some(ColorMode::Monochrome),
            side: self.side,
            bin: self.bin.clone(),
            paper: self.paper.clone(),
            copies: self.copies,
        }
    }
}

fn load_options(path: &Path) -> Result<PrintOptions> {
    let data = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&data)?;
    PrintOptions::from_value(&value)
}

fn extend(target: &mut Option<Vec<String>>, extra: &[String]) {
    if !extra.is_empty() {
        target.get_or_insert_with(Vec::new).extend_from_slice(extra);
    }
}

fn overlay(base: PrintSettings, top: PrintSettings) -> PrintSettings {
    PrintSettings {
        pages: top.pages.or(base.pages),
        subset: top.subset.or(base.subset),
        orientation: top.orientation.or(base.orientation),
        scale: top.scale.or(base.scale),
        color: top.color.or(base.color),
        side: top.side.or(base.side),
        bin: top.bin.or(base.bin),
        paper: top.paper.or(base.paper),
        copies: top.copies.or(base.copies),
    }
}

/// Parse a lowercase keyword into any of the serde-named setting enums.
fn keyword<T: DeserializeOwned>(s: &str) -> std::result::Result<T, String> {
    serde_json::from_value(serde_json::Value::String(s.to_ascii_lowercase()))
        .map_err(|_| format!("unknown value `{s}`"))
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// High-level entry points: list printers and print files.
//
// `PdfPrinter` holds no state besides its bridge, so clones are cheap and
// concurrent calls never interact. Each call spawns at most one process and
// returns whatever the bridge reports; execution errors are never wrapped or
// retried here.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use pdfprint_bridge::{PlatformBridge, system_bridge};
use pdfprint_core::error::Result;
use pdfprint_core::types::{
    CommandInvocation, ListingResult, Platform, PrintOptions, PrintRequest, PrinterListing,
};

use crate::command::{PrintCommandBuilder, listing_command};
use crate::{listing, lpstat};

/// Printer discovery and PDF printing through the host's print tools.
#[derive(Clone)]
pub struct PdfPrinter {
    bridge: Arc<dyn PlatformBridge>,
    platform: Platform,
}

impl PdfPrinter {
    pub fn new(bridge: Arc<dyn PlatformBridge>, platform: Platform) -> Self {
        Self { bridge, platform }
    }

    /// Printer backed by the real OS, for the platform we were built for.
    pub fn system() -> Self {
        Self::new(system_bridge(), Platform::current())
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Either every printer or only the default one.
    pub async fn list(&self, want_default: bool) -> Result<ListingResult> {
        Ok(if want_default {
            ListingResult::Default(self.default_printer().await?)
        } else {
            ListingResult::Printers(self.list_printers().await?)
        })
    }

    /// Every printer the OS knows about, in the order it reports them.
    pub async fn list_printers(&self) -> Result<PrinterListing> {
        let stdout = self.run(&listing_command(self.platform, false)).await?;
        let printers = match self.platform {
            Platform::Windows => listing::parse_printer_names(&stdout),
            Platform::Unix => lpstat::parse_lpstat_printers(&stdout),
        };
        debug!(count = printers.len(), "printers listed");
        Ok(printers)
    }

    /// The default printer's name, or an empty string when none is set.
    pub async fn default_printer(&self) -> Result<String> {
        let stdout = self.run(&listing_command(self.platform, true)).await?;
        Ok(match self.platform {
            Platform::Windows => listing::parse_default_printer(&stdout),
            Platform::Unix => lpstat::parse_lpstat_default(&stdout),
        })
    }

    fn builder(&self) -> PrintCommandBuilder<'_> {
        PrintCommandBuilder::new(self.bridge.as_ref(), self.platform)
    }

    /// Run the file checks of a print call on their own.
    pub fn check_file(&self, file: &Path) -> Result<()> {
        self.builder().check_file(file).map(|_| ())
    }

    /// Validate a print call and return the command it would run, without
    /// running it.
    pub fn prepare(&self, file: &Path, options: &PrintOptions) -> Result<CommandInvocation> {
        self.builder().build(file, options)
    }

    /// Print `file`, returning the print tool's stdout.
    pub async fn print_file(&self, file: impl AsRef<Path>, options: &PrintOptions) -> Result<String> {
        let cmd = self.prepare(file.as_ref(), options)?;
        info!(command = %cmd, "submitting print job");
        self.run(&cmd).await
    }

    /// Print a request whose options are still raw JSON.
    ///
    /// The file is checked before the options are parsed, so a missing file
    /// wins over malformed options.
    pub async fn print_request(&self, request: &PrintRequest) -> Result<String> {
        let builder = self.builder();
        let file_name = builder.check_file(Path::new(&request.file))?;
        let options = request.print_options()?;
        let cmd = builder.assemble(file_name, &options);
        info!(command = %cmd, "submitting print job");
        self.run(&cmd).await
    }

    /// Print from a loosely typed `{"file": ..., "options": {...}}` object.
    pub async fn print_value(&self, value: &Value) -> Result<String> {
        self.print_request(&PrintRequest::from_value(value)?).await
    }

    async fn run(&self, cmd: &CommandInvocation) -> Result<String> {
        debug!(bridge = self.bridge.platform_name(), program = %cmd.program, "executing");
        self.bridge
            .execute_with_env(&cmd.program, &cmd.args, &cmd.env)
            .await
    }
}

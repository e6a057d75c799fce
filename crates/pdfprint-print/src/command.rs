// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Construction of the command lines that list printers and print files.
//
// Windows prints through the bundled SumatraPDF executable:
//
//   SumatraPDF.exe [win32 tokens] [-print-settings S] (-print-to P | -print-to-default) -silent FILE
//
// The printer target and `-silent` are left out entirely when the caller
// passes `-print-dialog`, since SumatraPDF then asks the user interactively.
//
// Unix prints through CUPS `lp`, with the file last:
//
//   lp [-d P] [settings] [unix tokens] [--] FILE

use std::path::Path;

use pdfprint_bridge::PlatformBridge;
use pdfprint_core::error::{PdfPrintError, Result};
use pdfprint_core::types::{CommandInvocation, Platform, PrintOptions, PrintSettings, Scale};

use crate::tokenize::split_all;

/// Bundled SumatraPDF executable, relative to the bundle directory.
pub const SUMATRA_EXE: &str = "SumatraPDF.exe";

pub const PRINT_DIALOG: &str = "-print-dialog";
pub const PRINT_TO: &str = "-print-to";
pub const PRINT_TO_DEFAULT: &str = "-print-to-default";
pub const PRINT_SETTINGS: &str = "-print-settings";
pub const SILENT: &str = "-silent";

pub const WMIC: &str = "wmic";
pub const LPSTAT: &str = "lpstat";
pub const LP: &str = "lp";

/// `lpstat` output is parsed by its English wording, so it runs under the
/// C locale.
pub const C_LOCALE: (&str, &str) = ("LC_ALL", "C");

/// Command that enumerates printers (or just the default) on `platform`.
pub fn listing_command(platform: Platform, want_default: bool) -> CommandInvocation {
    match platform {
        Platform::Windows => {
            let mut cmd = CommandInvocation::new(WMIC);
            cmd.args(["printer", "get", if want_default { "default,name" } else { "name" }]);
            cmd
        }
        Platform::Unix => {
            let mut cmd = CommandInvocation::new(LPSTAT);
            cmd.env(C_LOCALE.0, C_LOCALE.1)
                .arg(if want_default { "-d" } else { "-lp" });
            cmd
        }
    }
}

/// Validates a print request and turns it into a ready-to-run command.
pub struct PrintCommandBuilder<'a> {
    bridge: &'a dyn PlatformBridge,
    platform: Platform,
}

impl<'a> PrintCommandBuilder<'a> {
    pub fn new(bridge: &'a dyn PlatformBridge, platform: Platform) -> Self {
        Self { bridge, platform }
    }

    /// Validate `file` and build the print command for it.
    pub fn build(&self, file: &Path, options: &PrintOptions) -> Result<CommandInvocation> {
        let file_name = self.check_file(file)?;
        Ok(self.assemble(file_name, options))
    }

    /// File checks, in order, stopping at the first failure: the path must be
    /// non-empty, valid UTF-8, and exist. Returns the path as a string.
    pub fn check_file<'p>(&self, file: &'p Path) -> Result<&'p str> {
        if file.as_os_str().is_empty() {
            return Err(PdfPrintError::NoPdfSpecified);
        }
        let file_name = file.to_str().ok_or(PdfPrintError::InvalidPdfName)?;
        if !self.bridge.exists(file) {
            return Err(PdfPrintError::NoSuchFile);
        }
        Ok(file_name)
    }

    /// Build the command for an already checked file.
    pub(crate) fn assemble(&self, file_name: &str, options: &PrintOptions) -> CommandInvocation {
        match self.platform {
            Platform::Windows => self.sumatra(file_name, options),
            Platform::Unix => lp(file_name, options),
        }
    }

    fn sumatra(&self, file: &str, options: &PrintOptions) -> CommandInvocation {
        let program = options
            .sumatra_pdf_path
            .clone()
            .unwrap_or_else(|| self.bridge.resolve(SUMATRA_EXE));
        let mut cmd = CommandInvocation::new(program.to_string_lossy());

        let tokens = split_all(options.win32.iter().flatten());
        let dialog = tokens.iter().any(|t| t == PRINT_DIALOG);
        cmd.args(tokens);

        if let Some(settings) = options.settings.as_ref().and_then(sumatra_settings) {
            cmd.arg(PRINT_SETTINGS).arg(settings);
        }

        if !dialog {
            match options.target_printer() {
                Some(printer) => cmd.arg(PRINT_TO).arg(printer),
                None => cmd.arg(PRINT_TO_DEFAULT),
            };
            cmd.arg(SILENT);
        }

        cmd.arg(file);
        cmd
    }
}

fn lp(file: &str, options: &PrintOptions) -> CommandInvocation {
    let mut cmd = CommandInvocation::new(LP);

    if let Some(printer) = options.target_printer() {
        cmd.arg("-d").arg(printer);
    }
    if let Some(settings) = &options.settings {
        cmd.args(lp_settings(settings));
    }
    cmd.args(split_all(options.unix.iter().flatten()));

    if file.starts_with('-') {
        cmd.arg("--");
    }
    cmd.arg(file);
    cmd
}

/// Render settings as a SumatraPDF `-print-settings` value, or `None` when
/// nothing is set.
pub fn sumatra_settings(settings: &PrintSettings) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    if let Some(pages) = settings.pages.as_deref().filter(|p| !p.is_empty()) {
        parts.push(pages.to_string());
    }
    if let Some(subset) = settings.subset {
        parts.push(subset.keyword().to_string());
    }
    if let Some(orientation) = settings.orientation {
        parts.push(orientation.sumatra_keyword().to_string());
    }
    if let Some(scale) = settings.scale {
        parts.push(scale.sumatra_keyword().to_string());
    }
    if let Some(color) = settings.color {
        parts.push(color.sumatra_keyword().to_string());
    }
    if let Some(side) = settings.side {
        parts.push(side.sumatra_keyword().to_string());
    }
    if let Some(bin) = settings.bin.as_deref().filter(|b| !b.is_empty()) {
        parts.push(format!("bin={bin}"));
    }
    if let Some(paper) = settings.paper.as_deref().filter(|p| !p.is_empty()) {
        parts.push(format!("paper={paper}"));
    }
    if let Some(copies) = settings.copies {
        parts.push(format!("{copies}x"));
    }

    (!parts.is_empty()).then(|| parts.join(","))
}

/// Render settings as `lp` flags.
pub fn lp_settings(settings: &PrintSettings) -> Vec<String> {
    let mut args = Vec::new();
    let mut option = |value: String| {
        args.push("-o".to_string());
        args.push(value);
    };

    if let Some(subset) = settings.subset {
        option(format!("page-set={}", subset.keyword()));
    }
    if let Some(orientation) = settings.orientation {
        option(format!("orientation-requested={}", orientation.cups_orientation()));
    }
    if let Some(scale) = settings.scale {
        option(
            match scale {
                Scale::NoScale => "print-scaling=none",
                Scale::Shrink => "print-scaling=auto-fit",
                Scale::Fit => "print-scaling=fit",
            }
            .to_string(),
        );
    }
    if let Some(color) = settings.color {
        option(format!("print-color-mode={}", color.cups_keyword()));
    }
    if let Some(side) = settings.side {
        option(format!("sides={}", side.cups_sides_keyword()));
    }
    if let Some(bin) = settings.bin.as_deref().filter(|b| !b.is_empty()) {
        option(format!("InputSlot={bin}"));
    }
    if let Some(paper) = settings.paper.as_deref().filter(|p| !p.is_empty()) {
        option(format!("media={paper}"));
    }

    if let Some(pages) = settings.pages.as_deref().filter(|p| !p.is_empty()) {
        args.push("-P".to_string());
        args.push(pages.to_string());
    }
    if let Some(copies) = settings.copies {
        args.push("-n".to_string());
        args.push(copies.to_string());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfprint_bridge::RecordingBridge;
    use pdfprint_core::types::{ColorMode, Orientation, PageSubset, Side};

    const PDF: &str = "assets/pdf-sample.pdf";

    fn windows(bridge: &RecordingBridge, options: &PrintOptions) -> Result<CommandInvocation> {
        PrintCommandBuilder::new(bridge, Platform::Windows).build(Path::new(PDF), options)
    }

    fn raw_args(raw: &[&str]) -> Option<Vec<String>> {
        Some(raw.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn listing_commands_per_platform() {
        assert_eq!(
            listing_command(Platform::Windows, false).to_string(),
            "wmic printer get name"
        );
        assert_eq!(
            listing_command(Platform::Windows, true).to_string(),
            "wmic printer get default,name"
        );
        assert_eq!(
            listing_command(Platform::Unix, false).to_string(),
            "LC_ALL=C lpstat -lp"
        );
        assert_eq!(listing_command(Platform::Unix, true).to_string(), "LC_ALL=C lpstat -d");
    }

    #[test]
    fn only_lpstat_forces_the_c_locale() {
        for want_default in [false, true] {
            let unix = listing_command(Platform::Unix, want_default);
            assert_eq!(unix.env, vec![("LC_ALL".to_string(), "C".to_string())]);
            assert!(listing_command(Platform::Windows, want_default).env.is_empty());
        }

        let bridge = RecordingBridge::new();
        let cmd = PrintCommandBuilder::new(&bridge, Platform::Unix)
            .build(Path::new("report.pdf"), &PrintOptions::default())
            .expect("build");
        assert!(cmd.env.is_empty());
    }

    #[test]
    fn default_printer_and_bundled_executable() {
        let bridge = RecordingBridge::new().with_bundle_dir("mocked_path");
        let cmd = windows(&bridge, &PrintOptions::default()).expect("build");
        assert_eq!(
            Path::new(&cmd.program),
            Path::new("mocked_path").join(SUMATRA_EXE)
        );
        assert_eq!(cmd.args, vec![PRINT_TO_DEFAULT, SILENT, PDF]);
    }

    #[test]
    fn settings_render_before_printer_target() {
        let bridge = RecordingBridge::new();
        let options = PrintOptions {
            printer: Some("Zebra".into()),
            settings: Some(PrintSettings {
                pages: Some("1-3,5".into()),
                orientation: Some(Orientation::Landscape),
                scale: Some(Scale::Fit),
                copies: Some(2),
                ..Default::default()
            }),
            ..Default::default()
        };
        let cmd = windows(&bridge, &options).expect("build");
        assert_eq!(
            cmd.args,
            vec![PRINT_SETTINGS, "1-3,5,landscape,fit,2x", PRINT_TO, "Zebra", SILENT, PDF]
        );
    }

    #[test]
    fn empty_settings_add_nothing() {
        assert_eq!(sumatra_settings(&PrintSettings::default()), None);
        assert!(lp_settings(&PrintSettings::default()).is_empty());
    }

    #[test]
    fn print_dialog_only_suppresses_when_exact() {
        let bridge = RecordingBridge::new();
        let options = PrintOptions {
            win32: raw_args(&["-print-dialog-please"]),
            ..Default::default()
        };
        let cmd = windows(&bridge, &options).expect("build");
        assert_eq!(
            cmd.args,
            vec!["-print-dialog-please", PRINT_TO_DEFAULT, SILENT, PDF]
        );
    }

    #[test]
    fn quoted_dialog_token_still_counts() {
        let bridge = RecordingBridge::new();
        let options = PrintOptions {
            printer: Some("Zebra".into()),
            win32: raw_args(&[r#""-print-dialog" -exit-when-done"#]),
            ..Default::default()
        };
        let cmd = windows(&bridge, &options).expect("build");
        assert_eq!(cmd.args, vec![PRINT_DIALOG, "-exit-when-done", PDF]);
    }

    #[test]
    fn lp_puts_printer_settings_and_tokens_before_file() {
        let bridge = RecordingBridge::new();
        let options = PrintOptions {
            printer: Some("Office_Laser".into()),
            unix: raw_args(&[r#"-o "job-sheets=none""#]),
            settings: Some(PrintSettings {
                subset: Some(PageSubset::Odd),
                color: Some(ColorMode::Monochrome),
                side: Some(Side::DuplexShort),
                paper: Some("A4".into()),
                copies: Some(3),
                ..Default::default()
            }),
            // Ignored by lp.
            win32: raw_args(&["-print-dialog"]),
            ..Default::default()
        };
        let cmd = PrintCommandBuilder::new(&bridge, Platform::Unix)
            .build(Path::new("report.pdf"), &options)
            .expect("build");
        assert_eq!(cmd.program, LP);
        assert_eq!(
            cmd.args,
            vec![
                "-d",
                "Office_Laser",
                "-o",
                "page-set=odd",
                "-o",
                "print-color-mode=monochrome",
                "-o",
                "sides=two-sided-short-edge",
                "-o",
                "media=A4",
                "-n",
                "3",
                "-o",
                "job-sheets=none",
                "report.pdf",
            ]
        );
    }

    #[test]
    fn lp_guards_dash_leading_file_names() {
        let bridge = RecordingBridge::new();
        let cmd = PrintCommandBuilder::new(&bridge, Platform::Unix)
            .build(Path::new("-weird.pdf"), &PrintOptions::default())
            .expect("build");
        assert_eq!(cmd.args, vec!["--", "-weird.pdf"]);
    }

    #[test]
    fn validation_runs_before_assembly() {
        let bridge = RecordingBridge::new().with_files_existing(false);
        let builder = PrintCommandBuilder::new(&bridge, Platform::Windows);

        assert!(matches!(
            builder.build(Path::new(""), &PrintOptions::default()),
            Err(PdfPrintError::NoPdfSpecified)
        ));
        assert!(matches!(
            builder.build(Path::new("file.txt"), &PrintOptions::default()),
            Err(PdfPrintError::NoSuchFile)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_path_is_invalid_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let bridge = RecordingBridge::new();
        let path = Path::new(OsStr::from_bytes(b"bad-\xff.pdf"));
        let err = PrintCommandBuilder::new(&bridge, Platform::Windows)
            .build(path, &PrintOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid PDF name");
    }

    #[test]
    fn arguments_never_contain_empty_strings() {
        let bridge = RecordingBridge::new();
        let options = PrintOptions {
            printer: Some(String::new()),
            win32: raw_args(&["", "  ", r#""""#]),
            settings: Some(PrintSettings {
                bin: Some(String::new()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let cmd = windows(&bridge, &options).expect("build");
        assert!(cmd.args.iter().all(|a| !a.is_empty()));
        assert_eq!(cmd.args, vec![PRINT_TO_DEFAULT, SILENT, PDF]);
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for pdfprint.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PdfPrintError, Result};

/// Printer names in the order the OS tool reported them.
pub type PrinterListing = Vec<String>;

/// Outcome of parsing a printer enumeration listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingResult {
    /// Every printer, header excluded.
    Printers(PrinterListing),
    /// The printer marked as default, or an empty string when none is.
    Default(String),
}

/// Which family of print tools to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// `wmic` for enumeration, bundled SumatraPDF for printing.
    Windows,
    /// CUPS `lpstat` for enumeration, `lp` for printing.
    Unix,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// SumatraPDF `-print-settings` keyword.
    pub fn sumatra_keyword(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// CUPS `orientation-requested` value (RFC 8011 §5.2.10).
    pub fn cups_orientation(&self) -> u8 {
        match self {
            Self::Portrait => 3,
            Self::Landscape => 4,
        }
    }
}

/// Restrict printing to odd or even pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSubset {
    Odd,
    Even,
}

impl PageSubset {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Odd => "odd",
            Self::Even => "even",
        }
    }
}

/// How pages are scaled onto the paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    NoScale,
    Shrink,
    Fit,
}

impl Scale {
    pub fn sumatra_keyword(&self) -> &'static str {
        match self {
            Self::NoScale => "noscale",
            Self::Shrink => "shrink",
            Self::Fit => "fit",
        }
    }
}

/// Colour mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Color,
    Monochrome,
}

impl ColorMode {
    pub fn sumatra_keyword(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Monochrome => "monochrome",
        }
    }

    /// CUPS `print-color-mode` keyword.
    pub fn cups_keyword(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Monochrome => "monochrome",
        }
    }
}

/// Single or double sided printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Simplex,
    /// Duplex using the printer's default binding edge.
    Duplex,
    DuplexShort,
    DuplexLong,
}

impl Side {
    pub fn sumatra_keyword(&self) -> &'static str {
        match self {
            Self::Simplex => "simplex",
            Self::Duplex => "duplex",
            Self::DuplexShort => "duplexshort",
            Self::DuplexLong => "duplexlong",
        }
    }

    /// CUPS `sides` keyword (RFC 8011 §5.2.8).
    pub fn cups_sides_keyword(&self) -> &'static str {
        match self {
            Self::Simplex => "one-sided",
            Self::Duplex | Self::DuplexLong => "two-sided-long-edge",
            Self::DuplexShort => "two-sided-short-edge",
        }
    }
}

/// Typed print settings, rendered into tool-specific flags by the command
/// builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrintSettings {
    /// Page ranges such as `1-3,5`.
    pub pages: Option<String>,
    pub subset: Option<PageSubset>,
    pub orientation: Option<Orientation>,
    pub scale: Option<Scale>,
    pub color: Option<ColorMode>,
    pub side: Option<Side>,
    /// Paper tray, by number or name.
    pub bin: Option<String>,
    /// Paper size name, e.g. `A4` or `letter`.
    pub paper: Option<String>,
    pub copies: Option<u32>,
}

impl PrintSettings {
    /// Whether no setting is populated.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Options accepted by a print call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintOptions {
    /// Target printer. `None` prints to the OS default.
    pub printer: Option<String>,
    /// Overrides the bundled SumatraPDF executable.
    pub sumatra_pdf_path: Option<PathBuf>,
    /// Raw SumatraPDF arguments; each entry may hold several quoted tokens.
    pub win32: Option<Vec<String>>,
    /// Raw `lp` arguments; each entry may hold several quoted tokens.
    pub unix: Option<Vec<String>>,
    pub settings: Option<PrintSettings>,
}

impl PrintOptions {
    /// Build options from a loosely typed JSON object, checking the shape of
    /// every known field.
    ///
    /// `null` yields the defaults. Unknown keys are rejected.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            other => {
                return Err(PdfPrintError::InvalidOptions(format!(
                    "expected an object, got {}",
                    json_kind(other)
                )));
            }
        };

        if let Some(key) = map
            .keys()
            .find(|k| !matches!(k.as_str(), "printer" | "sumatraPdfPath" | "win32" | "unix" | "settings"))
        {
            return Err(PdfPrintError::InvalidOptions(format!("unknown option `{key}`")));
        }

        let settings = match map.get("settings") {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                serde_json::from_value::<PrintSettings>(v.clone())
                    .map_err(|e| PdfPrintError::InvalidOptions(format!("settings: {e}")))?,
            ),
        };

        Ok(Self {
            printer: optional_string(map, "printer")?,
            sumatra_pdf_path: optional_string(map, "sumatraPdfPath")?.map(PathBuf::from),
            win32: optional_string_list(map, "win32")?,
            unix: optional_string_list(map, "unix")?,
            settings,
        })
    }

    /// The printer name, treating an empty name as unset.
    pub fn target_printer(&self) -> Option<&str> {
        self.printer.as_deref().filter(|p| !p.is_empty())
    }
}

/// A file plus the raw options to print it with.
///
/// Options stay untyped until the printer has confirmed the file exists, so a
/// missing file is reported ahead of any malformed option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintRequest {
    pub file: String,
    pub options: Value,
}

impl PrintRequest {
    /// Build a request from `{"file": ..., "options": {...}}`.
    ///
    /// A missing or falsy `file` fails with [`PdfPrintError::NoPdfSpecified`];
    /// any other non-string fails with [`PdfPrintError::InvalidPdfName`]. File
    /// existence and option shapes are checked later, by the printer.
    pub fn from_value(value: &Value) -> Result<Self> {
        let file = match value.get("file") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => {
                return Err(PdfPrintError::NoPdfSpecified);
            }
            Some(Value::String(s)) if s.is_empty() => return Err(PdfPrintError::NoPdfSpecified),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => {
                return Err(PdfPrintError::NoPdfSpecified);
            }
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(PdfPrintError::InvalidPdfName),
        };

        Ok(Self {
            file,
            options: value.get("options").cloned().unwrap_or(Value::Null),
        })
    }

    /// Typed view of [`PrintRequest::options`].
    pub fn print_options(&self) -> Result<PrintOptions> {
        PrintOptions::from_value(&self.options)
    }
}

/// A fully resolved command, ready to hand to an executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    pub program: String,
    pub args: Vec<String>,
    /// Environment overrides applied on top of the inherited environment.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<(String, String)>,
}

impl CommandInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Set an environment variable for the command.
    pub fn env(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Append one argument. Empty arguments are dropped.
    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        let arg = arg.into();
        if !arg.is_empty() {
            self.args.push(arg);
        }
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for a in args {
            self.arg(a);
        }
        self
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{key}={} ", display_quoted(value))?;
        }
        write!(f, "{}", display_quoted(&self.program))?;
        for a in &self.args {
            write!(f, " {}", display_quoted(a))?;
        }
        Ok(())
    }
}

fn display_quoted(s: &str) -> String {
    if s.chars().any(char::is_whitespace) {
        format!("\"{s}\"")
    } else {
        s.to_string()
    }
}

// -- JSON shape helpers -------------------------------------------------------

fn optional_string(map: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(PdfPrintError::InvalidOptions(format!(
            "options.{key} should be a string, got {}",
            json_kind(other)
        ))),
    }
}

fn optional_string_list(map: &Map<String, Value>, key: &'static str) -> Result<Option<Vec<String>>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(PdfPrintError::InvalidOptions(format!(
                    "options.{key} entries should be strings, got {}",
                    json_kind(other)
                ))),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(_) => Err(PdfPrintError::OptionsNotArray(key)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

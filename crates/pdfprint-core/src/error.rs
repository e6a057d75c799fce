// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for pdfprint.
//
// The validation messages are matched on by callers, so their text is part of
// the public contract and must not change.

use thiserror::Error;

/// Top-level error type for all pdfprint operations.
#[derive(Debug, Error)]
pub enum PdfPrintError {
    // -- Validation errors (raised before any process is spawned) --
    #[error("No PDF specified")]
    NoPdfSpecified,

    #[error("Invalid PDF name")]
    InvalidPdfName,

    #[error("No such file")]
    NoSuchFile,

    /// A passthrough option list (`win32` / `unix`) was not an array.
    #[error("options.{0} should be an array")]
    OptionsNotArray(&'static str),

    #[error("invalid print options: {0}")]
    InvalidOptions(String),

    // -- Execution errors (reported by the command executor) --
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PdfPrintError {
    /// Whether this error was raised by request validation rather than by
    /// running an external command.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoPdfSpecified
                | Self::InvalidPdfName
                | Self::NoSuchFile
                | Self::OptionsNotArray(_)
                | Self::InvalidOptions(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PdfPrintError>;

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parsing of CUPS `lpstat` output.

use pdfprint_core::types::PrinterListing;

const PRINTER_PREFIX: &str = "printer ";
const DEFAULT_PREFIX: &str = "system default destination:";

/// Printer names from `lpstat -lp`.
///
/// Each queue starts with a `printer NAME is idle.  enabled since …` line;
/// the indented detail lines that `-l` adds are ignored.
pub fn parse_lpstat_printers(raw: &str) -> PrinterListing {
    raw.lines()
        .filter(|line| line.starts_with(PRINTER_PREFIX))
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(str::to_string)
        .collect()
}

/// Default destination from `lpstat -d`, or an empty string when none is set.
pub fn parse_lpstat_default(raw: &str) -> String {
    raw.lines()
        .find_map(|line| line.trim().strip_prefix(DEFAULT_PREFIX))
        .map(|name| name.trim().to_string())
        .unwrap_or_default()
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parsing of Windows printer enumeration output.
//
// `wmic printer get name` prints a `Name` header followed by one row per
// printer; `wmic printer get default,name` adds a leading `TRUE`/`FALSE`
// column:
//
//   Default     Name
//   FALSE       Windows Printer
//   TRUE        Zebra
//
// Columns are padded to variable widths and rows may be separated by blank
// lines, so nothing here relies on fixed offsets.

use pdfprint_core::types::{ListingResult, PrinterListing};

/// Flag value marking the default printer.
const DEFAULT_FLAG: &str = "TRUE";

/// Parse enumeration output into either every printer name or the default
/// printer.
pub fn parse(raw: &str, want_default: bool) -> ListingResult {
    if want_default {
        ListingResult::Default(parse_default_printer(raw))
    } else {
        ListingResult::Printers(parse_printer_names(raw))
    }
}

/// Every printer name, in the order the tool printed them.
pub fn parse_printer_names(raw: &str) -> PrinterListing {
    data_rows(raw).map(str::to_string).collect()
}

/// The name on the first row flagged `TRUE`, or an empty string.
pub fn parse_default_printer(raw: &str) -> String {
    data_rows(raw)
        .find_map(|row| {
            let (flag, name) = row.split_once(char::is_whitespace).unwrap_or((row, ""));
            (flag == DEFAULT_FLAG).then(|| name.trim().to_string())
        })
        .unwrap_or_default()
}

/// Trimmed, non-blank rows with the header removed.
fn data_rows(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .skip(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: &str = "
Name

Windows Printer

Zebra

        ";

    const WITH_DEFAULT: &str = "
Default     Name
FALSE       Windows Printer
TRUE        Zebra
        ";

    #[test]
    fn names_exclude_header_and_blank_lines() {
        assert_eq!(parse_printer_names(NAMES), vec!["Windows Printer", "Zebra"]);
    }

    #[test]
    fn default_printer_is_the_true_row() {
        assert_eq!(parse_default_printer(WITH_DEFAULT), "Zebra");
    }

    #[test]
    fn no_true_row_gives_empty_string() {
        let raw = "Default  Name\r\nFALSE  A\r\nFALSE  B\r\n";
        assert_eq!(parse_default_printer(raw), "");
        assert_eq!(parse_default_printer(""), "");
    }

    #[test]
    fn flag_match_is_case_sensitive() {
        let raw = "Default Name\ntrue    Lowercase\nTrue    Titlecase\n";
        assert_eq!(parse_default_printer(raw), "");
    }

    #[test]
    fn tab_separated_columns_are_tolerated() {
        let raw = "Default\tName\nFALSE\t\tFax\nTRUE\t\tMicrosoft Print to PDF  \n";
        assert_eq!(parse_default_printer(raw), "Microsoft Print to PDF");
    }

    #[test]
    fn header_only_or_empty_gives_no_printers() {
        assert!(parse_printer_names("Name   \r\n\r\n").is_empty());
        assert!(parse_printer_names("").is_empty());
    }

    #[test]
    fn duplicates_are_passed_through() {
        let raw = "Name\nZebra\nZebra\n";
        assert_eq!(parse_printer_names(raw), vec!["Zebra", "Zebra"]);
    }

    #[test]
    fn parse_dispatches_on_want_default() {
        assert_eq!(
            parse(NAMES, false),
            ListingResult::Printers(vec!["Windows Printer".into(), "Zebra".into()])
        );
        assert_eq!(parse(WITH_DEFAULT, true), ListingResult::Default("Zebra".into()));
    }
}

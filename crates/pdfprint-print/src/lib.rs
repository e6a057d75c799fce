// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdfprint Print — parsing of printer enumeration output and construction of
// the commands that print PDF files. This crate sits between the domain
// types in `pdfprint-core` and the host capabilities in `pdfprint-bridge`.

pub mod command;
pub mod listing;
pub mod lpstat;
pub mod printer;
pub mod tokenize;

pub use command::PrintCommandBuilder;
pub use printer::PdfPrinter;

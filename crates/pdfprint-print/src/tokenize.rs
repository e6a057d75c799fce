// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Splitting of raw passthrough options into argv tokens.
//
// Callers hand us strings such as `-print-settings "1,2,fit"`. Whitespace
// separates tokens except inside double quotes; the quotes themselves are
// stripped. No escaping is supported, matching what the print tools accept.

/// Tokenizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InQuotes,
}

/// Split one raw option string into tokens.
///
/// An unterminated quote extends to the end of the input. Empty tokens (for
/// example `""`) are dropped.
pub fn split_quoted(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut state = State::Outside;

    for ch in raw.chars() {
        match (state, ch) {
            (State::Outside, '"') => state = State::InQuotes,
            (State::InQuotes, '"') => state = State::Outside,
            (State::Outside, c) if c.is_whitespace() => flush(&mut tokens, &mut current),
            (_, c) => current.push(c),
        }
    }
    flush(&mut tokens, &mut current);

    tokens
}

/// Split every raw option string, keeping the original order.
pub fn split_all<I, S>(raws: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raws.into_iter()
        .flat_map(|raw| split_quoted(raw.as_ref()))
        .collect()
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

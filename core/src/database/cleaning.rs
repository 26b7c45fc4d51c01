//! Text cleaning for multi-line form input
//!
//! Ingredients and instructions arrive as one block of text with one entry
//! per line, often numbered ("1. Flour"). Cleaning turns that block into an
//! ordered list of trimmed, non-empty entries without the numbering.

/// Split a multi-line block into cleaned entries.
///
/// Each line is trimmed, loses its leading `N.` ordinal prefix, and is
/// dropped if nothing remains. Order is preserved.
pub fn clean_lines(input: &str) -> Vec<String> {
    input
        .split('\n')
        .map(|line| strip_ordinal_prefix(line.trim()))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove leading ordinal prefixes ("1. ", "12.") from an already trimmed line.
///
/// Prefixes are stripped repeatedly so that cleaning is idempotent
/// ("1. 2. Flour" and "2. Flour" both clean to "Flour").
fn strip_ordinal_prefix(mut line: &str) -> &str {
    loop {
        let digits = line.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return line;
        }

        let Some(rest) = line[digits..].strip_prefix('.') else {
            return line;
        };

        line = rest.trim_start();
    }
}

/// Keep only ASCII digits, as the numeric cook-time field does on input
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Render cleaned entries back into the one-per-line form used for editing
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

//! Text normalisation shared by clustering and clause parameter extraction.

/// Normalise submission text for vectorisation and pattern matching.
///
/// Lowercases, collapses every whitespace run to a single space, drops every
/// character outside `[a-z0-9 ]`, then trims. Collapsing happens first, so a
/// dropped character between two spaces leaves both: "a - b" → "a  b".
///
/// "Declare ALL   assets!\n(yearly)" → "declare all assets yearly"
pub fn normalize_text(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut in_space = false;

    for c in lower.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
            continue;
        }
        // Any non-space ends the run, even one that is dropped below.
        in_space = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        }
    }

    out.trim().to_string()
}

//! Header label normalization
//!
//! Raw column labels arrive with mixed full-width/half-width characters,
//! embedded spaces, and decorative separators that vary per dataset revision.
//! Normalizing every label (and every candidate label) before comparison makes
//! field resolution a plain string lookup.

/// Canonicalize a raw column label for comparison.
///
/// - full-width ASCII forms (U+FF01..=U+FF5E) become their half-width
///   equivalents, which also unifies full-width parentheses and colons
/// - all whitespace is stripped, including the ideographic space U+3000
/// - bracket variants collapse to a single pair of ASCII parentheses
/// - middle-dot separators are removed
///
/// Idempotent: normalizing an already-normalized label is a no-op.
pub fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        let c = match c {
            '\u{FF01}'..='\u{FF5E}' => {
                char::from_u32(c as u32 - 0xFEE0).unwrap_or(c)
            }
            other => other,
        };
        match c {
            c if c.is_whitespace() => {}
            '・' | '･' => {}
            '［' | '〔' | '【' | '〈' => out.push('('),
            '］' | '〕' | '】' | '〉' => out.push(')'),
            '：' => out.push(':'),
            c => out.push(c),
        }
    }
    out
}

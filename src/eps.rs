// 🔢 EPS conversion - string to exact decimal
//
// Registry files come from both point- and comma-decimal locales, so
// "12.34" and "12,34" must both read as 12.34.

use rust_decimal::Decimal;

/// Convert an EPS string to an exact decimal.
///
/// Accepts either a point or a comma as decimal mark. A comma is only read
/// as decimal mark when the string has no point in it. Surrounding
/// whitespace is ignored and scientific notation ("1.5e2") is accepted.
///
/// Never fails: anything that is not an exact decimal comes back as zero.
/// That includes values with more precision than `Decimal` can hold, which
/// are never rounded.
pub fn string_to_decimal(s: &str) -> Decimal {
    try_string_to_decimal(s).unwrap_or_else(|| {
        if !s.trim().is_empty() {
            tracing::debug!(eps = s, "EPS is not a decimal number, using 0");
        }
        Decimal::ZERO
    })
}

/// Parse the way `string_to_decimal` does, but report failure instead of
/// falling back to zero.
pub fn try_string_to_decimal(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();

    if trimmed.contains('.') {
        parse_exact(trimmed)
    } else {
        parse_exact(&trimmed.replace(',', "."))
    }
}

fn parse_exact(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }

    if s.contains(|c: char| c == 'e' || c == 'E') {
        return Decimal::from_scientific(s).ok();
    }

    Decimal::from_str_exact(s).ok()
}

// ============================================================================
// TESTS
// ============================================================================

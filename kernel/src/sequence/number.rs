//! Numeric coercion for user-supplied tokens and the stable textual form of
//! sequence values.
//!
//! Accepted syntax: decimal integers and floats with optional sign and
//! exponent (`1`, `-2.5`, `+3`, `1e3`, `.5`), and unsigned `0x`/`0o`/`0b`
//! prefixed integers (prefix letter case-insensitive). Anything that does not
//! yield a finite `f64` is rejected.

/// Parse one already-trimmed token into a finite number.
///
/// Returns `None` for anything that is not numeric, including `NaN`,
/// infinities, and radix literals that overflow `u64`.
#[must_use]
pub fn parse_number(token: &str) -> Option<f64> {
    if let Some(value) = parse_radix_literal(token) {
        return Some(value);
    }
    let value: f64 = token.parse().ok()?;
    value.is_finite().then_some(normalize_zero(value))
}

/// Render a value in its shortest round-trip decimal form.
///
/// Integral values carry no fractional part (`4`, not `4.0`) and negative
/// zero renders as `0`. `parse_number(&format_number(v)) == Some(v)` for
/// every finite `v`.
#[must_use]
pub fn format_number(value: f64) -> String {
    format!("{}", normalize_zero(value))
}

/// Fold `-0.0` into `0.0` so equal values have one representation.
#[must_use]
pub fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

fn parse_radix_literal(token: &str) -> Option<f64> {
    let bytes = token.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &token[2..];
    // from_str_radix tolerates a leading '+', which a radix literal must not carry.
    if digits.starts_with('+') {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    u64::from_str_radix(digits, radix).ok().map(|v| v as f64)
}

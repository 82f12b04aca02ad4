// src/attributes/numeric.rs
//
// Lenient number handling for scraped text. Nothing here fails: bad input maps
// to a fixed sentinel that downstream columns rely on.

/// Returned by [`get_int`] when the text holds no usable digits.
pub const INT_SENTINEL: u64 = 1;

/// Returned (formatted) by [`safe_divide`] when the division cannot be done.
pub const RATIO_SENTINEL: f64 = 1.0;

/// Keep only ASCII digits and read them as one integer.
/// `"1,234 sqft"` → 1234, `"$450,000"` → 450000, `"N/A"` → [`INT_SENTINEL`].
pub fn get_int(s: &str) -> u64 {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(INT_SENTINEL)
}

/// `x / y` as a two-decimal string. Zero divisor or a non-finite result
/// yields the sentinel, formatted the same way (`"1.00"`).
pub fn safe_divide(x: f64, y: f64) -> String {
    if y == 0.0 {
        return format_ratio(RATIO_SENTINEL);
    }
    let q = x / y;
    if q.is_finite() { format_ratio(q) } else { format_ratio(RATIO_SENTINEL) }
}

/// Same as [`safe_divide`], but the numerator is text that must parse as a
/// float as-is (empty or non-numeric → sentinel).
pub fn safe_divide_str(x: &str, y: f64) -> String {
    match x.trim().parse::<f64>() {
        Ok(v) => safe_divide(v, y),
        Err(_) => format_ratio(RATIO_SENTINEL),
    }
}

/// The sentinel ratio as it appears in a cell.
pub fn ratio_sentinel() -> String {
    format_ratio(RATIO_SENTINEL)
}

/// Integer quotient of two digit-extracted values, then scaled down by `scale`.
/// A zero divisor yields the sentinel.
pub fn scaled_ratio(numerator: &str, denominator: &str, scale: f64) -> String {
    match get_int(numerator).checked_div(get_int(denominator)) {
        Some(q) => safe_divide(q as f64, scale),
        None => ratio_sentinel(),
    }
}

fn format_ratio(v: f64) -> String {
    format!("{v:.2}")
}

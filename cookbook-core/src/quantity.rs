//! Ingredient quantity parsing and display formatting.

/// Largest magnitude that is still rounded to cents before display.
/// Beyond this, multiplying by 100 loses precision anyway.
const ROUNDING_LIMIT: f64 = 1e15;

/// Parse a quantity written as text.
///
/// Accepts integers, decimals, fractions ("1/2") and mixed numbers
/// ("1 1/2"). Returns `None` for anything else, including non-finite values
/// and zero denominators.
pub fn parse_quantity(text: &str) -> Option<f64> {
    let text = text.trim();

    if text.is_empty() {
        return None;
    }

    // Mixed number: "1 1/2" or "2 3/4"
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() == 2 {
        let whole: f64 = parts[0].parse().ok()?;
        let frac = parse_fraction(parts[1])?;
        return finite(whole + frac);
    }

    if text.contains('/') {
        return parse_fraction(text);
    }

    finite(text.parse().ok()?)
}

/// Parse a quantity the forgiving way: missing or unreadable text is 0.
///
/// Text that doesn't parse as a whole still yields its leading number, so
/// "2 cups" is 2 and "1 1/2 cups" is 1.5.
pub fn lenient_quantity(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return 0.0;
    };

    if let Some(value) = parse_quantity(text) {
        return value;
    }

    // Retry with the first two words, then the first word ("1 1/2 cups", "1/2 cup")
    let words: Vec<&str> = text.split_whitespace().collect();
    for take in [2, 1] {
        if words.len() > take {
            if let Some(value) = parse_quantity(&words[..take].join(" ")) {
                return value;
            }
        }
    }

    leading_number(text).unwrap_or(0.0)
}

/// Format a quantity for display: at most 2 decimal places, trailing zeros
/// stripped ("1.50" shows as "1.5", "3.00" as "3").
pub fn format_quantity(quantity: f64) -> String {
    if !quantity.is_finite() {
        return "0".to_string();
    }

    let rounded = if quantity.abs() < ROUNDING_LIMIT {
        (quantity * 100.0).round() / 100.0
    } else {
        quantity.round()
    };

    // Avoid printing "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }

    rounded.to_string()
}

/// Parse a fraction string like "1/2" or "3/4".
fn parse_fraction(s: &str) -> Option<f64> {
    let (num, denom) = s.split_once('/')?;
    let num: f64 = num.trim().parse().ok()?;
    let denom: f64 = denom.trim().parse().ok()?;
    if denom == 0.0 {
        return None;
    }
    finite(num / denom)
}

/// The numeric prefix of a string: optional sign, digits, at most one dot.
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_dot = false;

    for (i, c) in s.char_indices() {
        match c {
            '-' | '+' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => break,
        }
        end = i + c.len_utf8();
    }

    finite(s[..end].parse().ok()?)
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

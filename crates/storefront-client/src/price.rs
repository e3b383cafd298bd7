/// Format an API amount for display, British English conventions.
///
/// Returns `None` when the amount is not a finite number or the currency code
/// is not a three letter code.
pub fn format_price(amount: &str, currency_code: &str) -> Option<String> {
    let value: f64 = amount.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    let code = currency_code.trim().to_ascii_uppercase();
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }

    let (prefix, decimals) = match code.as_str() {
        "GBP" => ("£".to_string(), 2),
        "EUR" => ("€".to_string(), 2),
        "USD" => ("US$".to_string(), 2),
        "JPY" => ("JP¥".to_string(), 0),
        other => (format!("{other} "), 2),
    };

    let fixed = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let sign = if value < 0.0 { "-" } else { "" };
    let mut out = format!("{sign}{prefix}{}", group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }

    Some(out)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pounds() {
        assert_eq!(format_price("89.0", "GBP").as_deref(), Some("£89.00"));
        assert_eq!(format_price("4.5", "gbp").as_deref(), Some("£4.50"));
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(format_price("1234567.891", "EUR").as_deref(), Some("€1,234,567.89"));
        assert_eq!(format_price("999.999", "GBP").as_deref(), Some("£1,000.00"));
        assert_eq!(format_price("100", "USD").as_deref(), Some("US$100.00"));
    }

    #[test]
    fn test_yen_has_no_minor_units() {
        assert_eq!(format_price("12000", "JPY").as_deref(), Some("JP¥12,000"));
    }

    #[test]
    fn test_other_currency_uses_code() {
        assert_eq!(format_price("15", "SEK").as_deref(), Some("SEK 15.00"));
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_price("-2500.5", "GBP").as_deref(), Some("-£2,500.50"));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(format_price("", "GBP"), None);
        assert_eq!(format_price("free", "GBP"), None);
        assert_eq!(format_price("NaN", "GBP"), None);
        assert_eq!(format_price("inf", "GBP"), None);
        assert_eq!(format_price("10", ""), None);
        assert_eq!(format_price("10", "POUNDS"), None);
    }
}

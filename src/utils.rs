use chrono::Utc;

/// Format a price for display with exactly two decimal digits
pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

/// Current time as epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Escape text for interpolation into HTML
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_two_decimals() {
        assert_eq!(format_price(101.0), "101.00");
        assert_eq!(format_price(0.5), "0.50");
        assert_eq!(format_price(1234.5678), "1234.57");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("AT&T <\"x\">"), "AT&amp;T &lt;&quot;x&quot;&gt;");
        assert_eq!(html_escape("plain"), "plain");
    }
}

/// Format a currency amount in whole units with thousands separators
pub fn format_currency(value: f64, symbol: &str) -> String {
    let units = value.abs().round() as u64;

    // Add thousands separators
    let digits = units.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let formatted: String = result.chars().rev().collect();

    if value < 0.0 && units > 0 {
        format!("-{symbol}{formatted}")
    } else {
        format!("{symbol}{formatted}")
    }
}

/// Format a probability already expressed in percent (72.3 -> "72.3%")
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0, "₹"), "₹0");
        assert_eq!(format_currency(999.0, "₹"), "₹999");
        assert_eq!(format_currency(25_000.0, "₹"), "₹25,000");
        assert_eq!(format_currency(5_000_000.4, "$"), "$5,000,000");
        assert_eq!(format_currency(-1_234.0, "₹"), "-₹1,234");
        assert_eq!(format_currency(-0.2, "₹"), "₹0");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(72.34), "72.3%");
        assert_eq!(format_percentage(100.0), "100.0%");
    }
}

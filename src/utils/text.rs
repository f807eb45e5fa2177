/// Fixed-point text with `,` thousands grouping, e.g. `1,234.50`
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    if value < 0.0 && grouped.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Compact number for SVG attributes: at most 3 decimals, no trailing zeros.
pub fn format_coord(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');

    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Fixed-point text with ties rounded away from zero, so `100.125` gives `100.13`.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);

    format!("{:.*}", decimals, (value * factor).round() / factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(90.0, 0), "90");
        assert_eq!(format_grouped(1000.0, 0), "1,000");
        assert_eq!(format_grouped(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_grouped(112.5, 1), "112.5");
        assert_eq!(format_grouped(-2500.0, 0), "-2,500");
        assert_eq!(format_grouped(-0.001, 1), "0.0");
    }

    #[test]
    fn test_format_coord() {
        assert_eq!(format_coord(60.0), "60");
        assert_eq!(format_coord(123.456789), "123.457");
        assert_eq!(format_coord(0.5), "0.5");
        assert_eq!(format_coord(-0.0001), "0");
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(100.125, 2), "100.13");
        assert_eq!(format_fixed(100.375, 2), "100.38");
        assert_eq!(format_fixed(-2.125, 2), "-2.13");
        assert_eq!(format_fixed(5.0, 2), "5.00");
        assert_eq!(format_fixed(0.25, 2), "0.25");
    }
}

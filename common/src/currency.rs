/// Format a price in reais for display, e.g. "R$ 45.00".
pub fn format_brl(amount: f64) -> String {
    format!("R$ {amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_decimal_places() {
        assert_eq!(format_brl(45.0), "R$ 45.00");
        assert_eq!(format_brl(25.5), "R$ 25.50");
        assert_eq!(format_brl(0.0), "R$ 0.00");
    }
}

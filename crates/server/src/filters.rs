//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

/// Formats a decimal amount as pesos with two decimal places.
///
/// Usage in templates: `{{ sale.total|money }}`
#[askama::filter_fn]
pub fn money(value: &Decimal, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_money(*value))
}

/// Returns the current year, for the footer.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

fn format_money(amount: Decimal) -> String {
    format!("${}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_keeps_the_stored_scale() {
        assert_eq!(format_money(Decimal::new(125, 1)), "$12.5");
        assert_eq!(format_money(Decimal::new(1250, 2)), "$12.50");
    }

    #[test]
    fn test_format_money_rounds_half_to_even() {
        assert_eq!(format_money(Decimal::new(12505, 3)), "$12.50");
        assert_eq!(format_money(Decimal::new(12515, 3)), "$12.52");
    }
}

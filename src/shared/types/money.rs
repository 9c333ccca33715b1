//! Monetary helpers shared by every billing calculation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to cents, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Generate a human-facing reference such as `BILL-3F9A0C12`.
///
/// The suffix is the first `len` hex characters of a v4 UUID, upper-cased.
pub fn reference_code(prefix: &str, len: usize) -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, raw[..len.min(raw.len())].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_money(dec!(2.345)), dec!(2.35));
        assert_eq!(round_money(dec!(2.344)), dec!(2.34));
        assert_eq!(round_money(dec!(-2.345)), dec!(-2.35));
    }

    #[test]
    fn reference_code_has_prefix_and_length() {
        let code = reference_code("TXN", 12);
        assert!(code.starts_with("TXN-"));
        assert_eq!(code.len(), 4 + 12);
        assert!(code[4..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }
}

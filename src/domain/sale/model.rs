//! Sale domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::shared::errors::DomainError;
use crate::shared::money::round_money;

/// Largest total a single sale may carry. Keeps report sums well inside
/// `Decimal` range.
pub const MAX_SALE_TOTAL: Decimal = dec!(1000000000000000);

/// One recorded sale of a product to a customer
#[derive(Debug, Clone)]
pub struct Sale {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub category: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    /// `quantity * unit_price`, before discount
    pub total_price: Decimal,
    pub customer_id: i32,
    pub customer_name: String,
    pub is_premium_customer: bool,
    pub discount_applied: Decimal,
    /// `total_price - discount_applied`
    pub final_amount: Decimal,
    pub payment_method: String,
    pub sale_date: DateTime<Utc>,
    pub region: String,
    pub salesperson: Option<String>,
    pub notes: Option<String>,
}

/// Input for recording a sale; totals are derived.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub product_id: i32,
    pub product_name: String,
    pub category: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub customer_id: i32,
    pub customer_name: String,
    pub is_premium_customer: bool,
    pub payment_method: String,
    pub sale_date: Option<DateTime<Utc>>,
    pub region: String,
    pub salesperson: Option<String>,
    pub notes: Option<String>,
}

impl Sale {
    /// Price a new sale. Premium customers get `premium_discount_rate` off.
    pub fn record(
        input: NewSale,
        premium_discount_rate: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if input.quantity < 1 {
            return Err(DomainError::Validation("Quantity must be at least 1".into()));
        }
        if input.unit_price.is_sign_negative() {
            return Err(DomainError::Validation("Unit price must not be negative".into()));
        }

        let out_of_range = || DomainError::Validation("Sale total out of range".into());
        let total_price = Decimal::from(input.quantity)
            .checked_mul(input.unit_price)
            .filter(|total| *total <= MAX_SALE_TOTAL)
            .ok_or_else(out_of_range)?;
        let discount_applied = if input.is_premium_customer {
            round_money(
                total_price
                    .checked_mul(premium_discount_rate)
                    .ok_or_else(out_of_range)?,
            )
        } else {
            Decimal::ZERO
        };

        Ok(Self {
            id: 0,
            product_id: input.product_id,
            product_name: input.product_name,
            category: input.category,
            quantity: input.quantity,
            unit_price: input.unit_price,
            total_price,
            customer_id: input.customer_id,
            customer_name: input.customer_name,
            is_premium_customer: input.is_premium_customer,
            discount_applied,
            final_amount: total_price - discount_applied,
            payment_method: input.payment_method,
            sale_date: input.sale_date.unwrap_or(now),
            region: input.region,
            salesperson: input.salesperson,
            notes: input.notes,
        })
    }
}

/// Inclusive sale-date window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// A range only applies when both bounds are given.
    pub fn from_bounds(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(Self { start, end }),
            _ => None,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn new_sale(product_id: i32, name: &str, quantity: i32, price: Decimal) -> NewSale {
        NewSale {
            product_id,
            product_name: name.into(),
            category: "Electronics".into(),
            quantity,
            unit_price: price,
            customer_id: 1,
            customer_name: "Alice Smith".into(),
            is_premium_customer: false,
            payment_method: "CREDIT_CARD".into(),
            sale_date: None,
            region: "North".into(),
            salesperson: None,
            notes: None,
        }
    }

    #[test]
    fn regular_customer_pays_full_price() {
        let sale =
            Sale::record(new_sale(1, "Laptop", 2, dec!(500)), dec!(0.20), Utc::now()).unwrap();
        assert_eq!(sale.total_price, dec!(1000));
        assert_eq!(sale.discount_applied, dec!(0));
        assert_eq!(sale.final_amount, dec!(1000));
    }

    #[test]
    fn premium_customer_gets_discount() {
        let mut input = new_sale(1, "Mouse", 3, dec!(19.99));
        input.is_premium_customer = true;
        let sale = Sale::record(input, dec!(0.20), Utc::now()).unwrap();
        assert_eq!(sale.total_price, dec!(59.97));
        assert_eq!(sale.discount_applied, dec!(11.99));
        assert_eq!(sale.final_amount, dec!(47.98));
    }

    #[test]
    fn sale_date_defaults_to_now() {
        let now = Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6).unwrap();
        let sale = Sale::record(new_sale(1, "Desk", 1, dec!(1)), dec!(0.2), now).unwrap();
        assert_eq!(sale.sale_date, now);
    }

    #[test]
    fn rejects_bad_quantity_and_price() {
        assert!(Sale::record(new_sale(1, "X", 0, dec!(1)), dec!(0.2), Utc::now()).is_err());
        assert!(Sale::record(new_sale(1, "X", 1, dec!(-1)), dec!(0.2), Utc::now()).is_err());
    }

    #[test]
    fn oversized_total_is_rejected() {
        let err = Sale::record(new_sale(1, "Laptop", 2, Decimal::MAX), dec!(0.2), Utc::now())
            .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert_eq!(msg, "Sale total out of range"),
            other => panic!("unexpected error: {other:?}"),
        }

        let too_big = new_sale(1, "Laptop", 1, MAX_SALE_TOTAL + dec!(0.01));
        assert!(Sale::record(too_big, dec!(0.2), Utc::now()).is_err());

        let mut at_limit = new_sale(1, "Laptop", 1, MAX_SALE_TOTAL);
        at_limit.is_premium_customer = true;
        let sale = Sale::record(at_limit, dec!(0.2), Utc::now()).unwrap();
        assert_eq!(sale.total_price, dec!(1000000000000000));
        assert_eq!(sale.final_amount, dec!(800000000000000));
    }

    #[test]
    fn range_needs_both_bounds() {
        let now = Utc::now();
        assert!(DateRange::from_bounds(Some(now), None).is_none());
        let range = DateRange::from_bounds(Some(now), Some(now)).unwrap();
        assert!(range.contains(now));
    }
}

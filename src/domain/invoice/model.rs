//! Invoice built from sales

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::period::{BillingPeriod, PeriodWindow};
use crate::domain::sale::Sale;
use crate::shared::money::{reference_code, round_money};

/// What to invoice: a period and an optional customer filter
#[derive(Debug, Clone)]
pub struct InvoiceRequest {
    pub period: BillingPeriod,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub customer_id: Option<i32>,
    pub customer_name: Option<String>,
}

impl InvoiceRequest {
    fn has_customer_filter(&self) -> bool {
        self.customer_id.is_some() || self.customer_name.is_some()
    }

    fn matches(&self, sale: &Sale) -> bool {
        if let Some(id) = self.customer_id {
            return sale.customer_id == id;
        }
        match self.customer_name.as_deref() {
            Some(name) if !name.is_empty() => sale
                .customer_name
                .to_lowercase()
                .contains(&name.to_lowercase()),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLineItem {
    pub product_name: String,
    pub quantity: i64,
    /// Unit price of the first sale of this product in the window
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone)]
pub struct SalesInvoice {
    pub bill_number: String,
    pub generated_date: DateTime<Utc>,
    /// Human-readable period label, e.g. `Week of Jan 05, 2026`
    pub period: String,
    pub period_start_date: NaiveDate,
    pub period_end_date: NaiveDate,
    pub customer_name: Option<String>,
    pub customer_id: Option<i32>,
    pub line_items: Vec<InvoiceLineItem>,
    pub subtotal: Decimal,
    pub total_discount: Decimal,
    pub taxable_amount: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
    pub total_transactions: u64,
    pub total_items_sold: i64,
    /// Most frequent payment method, `N/A` without sales
    pub payment_method: String,
}

impl SalesInvoice {
    /// Build the invoice for `window` from the sales recorded in it.
    ///
    /// `sales` must already be limited to [`PeriodWindow::bounds`]; the
    /// customer filter of `request` is applied here.
    pub fn build(
        request: &InvoiceRequest,
        window: PeriodWindow,
        sales: &[Sale],
        tax_rate: Decimal,
        now: DateTime<Utc>,
    ) -> Self {
        let matching: Vec<&Sale> = sales.iter().filter(|s| request.matches(s)).collect();

        let line_items = line_items(&matching);
        let subtotal: Decimal = line_items.iter().map(|l| l.subtotal).sum();
        let total_discount: Decimal = line_items.iter().map(|l| l.discount).sum();
        let taxable_amount = subtotal - total_discount;
        let tax_amount = round_money(taxable_amount * tax_rate);

        let (customer_name, customer_id) = match matching.first() {
            Some(first) if request.has_customer_filter() => {
                (Some(first.customer_name.clone()), Some(first.customer_id))
            }
            _ => (None, None),
        };

        Self {
            bill_number: reference_code("SB", 8),
            generated_date: now,
            period: window.description,
            period_start_date: window.start,
            period_end_date: window.end,
            customer_name,
            customer_id,
            line_items,
            subtotal,
            total_discount,
            taxable_amount,
            tax_rate,
            tax_amount,
            grand_total: taxable_amount + tax_amount,
            total_transactions: matching.len() as u64,
            total_items_sold: matching.iter().map(|s| i64::from(s.quantity)).sum(),
            payment_method: most_common_method(&matching),
        }
    }
}

/// One line per product name, in first-seen order.
fn line_items(sales: &[&Sale]) -> Vec<InvoiceLineItem> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut items: Vec<InvoiceLineItem> = Vec::new();

    for sale in sales {
        match index.get(sale.product_name.as_str()) {
            Some(&slot) => {
                let item = &mut items[slot];
                item.quantity += i64::from(sale.quantity);
                item.subtotal += sale.total_price;
                item.discount += sale.discount_applied;
                item.total += sale.final_amount;
            }
            None => {
                index.insert(sale.product_name.as_str(), items.len());
                items.push(InvoiceLineItem {
                    product_name: sale.product_name.clone(),
                    quantity: i64::from(sale.quantity),
                    unit_price: sale.unit_price,
                    subtotal: sale.total_price,
                    discount: sale.discount_applied,
                    total: sale.final_amount,
                });
            }
        }
    }

    items
}

fn most_common_method(sales: &[&Sale]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for sale in sales {
        match counts.iter_mut().find(|(m, _)| *m == sale.payment_method) {
            Some((_, n)) => *n += 1,
            None => counts.push((sale.payment_method.as_str(), 1)),
        }
    }

    // max_by_key keeps the last maximum, so walk in reverse to favour the first seen
    counts
        .into_iter()
        .rev()
        .max_by_key(|(_, n)| *n)
        .map(|(m, _)| m.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sale::model::tests::new_sale;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sale(
        name: &str,
        qty: i32,
        price: Decimal,
        customer: (i32, &str),
        method: &str,
        premium: bool,
    ) -> Sale {
        let mut input = new_sale(1, name, qty, price);
        input.customer_id = customer.0;
        input.customer_name = customer.1.into();
        input.payment_method = method.into();
        input.is_premium_customer = premium;
        input.sale_date = Some(Utc.with_ymd_and_hms(2026, 3, 4, 9, 30, 0).unwrap());
        Sale::record(input, dec!(0.20), Utc::now()).unwrap()
    }

    fn window() -> PeriodWindow {
        PeriodWindow::resolve(
            BillingPeriod::Custom,
            NaiveDate::from_ymd_opt(2026, 3, 1),
            NaiveDate::from_ymd_opt(2026, 3, 31),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        )
        .unwrap()
    }

    fn request() -> InvoiceRequest {
        InvoiceRequest {
            period: BillingPeriod::Custom,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 31),
            customer_id: None,
            customer_name: None,
        }
    }

    fn ledger() -> Vec<Sale> {
        vec![
            sale("Laptop", 1, dec!(1000), (1, "Alice Smith"), "CARD", true),
            sale("Mouse", 2, dec!(25), (2, "Bob Jones"), "CASH", false),
            sale("Laptop", 1, dec!(950), (2, "Bob Jones"), "CASH", false),
            sale("Cable", 3, dec!(5), (1, "Alice Smith"), "CARD", false),
        ]
    }

    #[test]
    fn totals_and_tax() {
        let inv = SalesInvoice::build(&request(), window(), &ledger(), dec!(0.10), Utc::now());

        assert_eq!(inv.line_items.len(), 3);
        let laptop = &inv.line_items[0];
        assert_eq!(laptop.product_name, "Laptop");
        assert_eq!(laptop.quantity, 2);
        assert_eq!(laptop.unit_price, dec!(1000));
        assert_eq!(laptop.subtotal, dec!(1950));
        assert_eq!(laptop.discount, dec!(200));
        assert_eq!(laptop.total, dec!(1750));

        assert_eq!(inv.subtotal, dec!(2015));
        assert_eq!(inv.total_discount, dec!(200));
        assert_eq!(inv.taxable_amount, dec!(1815));
        assert_eq!(inv.tax_amount, dec!(181.50));
        assert_eq!(inv.grand_total, dec!(1996.50));
        assert_eq!(inv.total_transactions, 4);
        assert_eq!(inv.total_items_sold, 7);
        assert!(inv.customer_id.is_none());
        assert!(inv.bill_number.starts_with("SB-"));
        assert_eq!(inv.period, "Mar 01, 2026 to Mar 31, 2026");
    }

    #[test]
    fn line_items_keep_first_seen_order() {
        let inv = SalesInvoice::build(&request(), window(), &ledger(), dec!(0.10), Utc::now());
        let names: Vec<&str> = inv.line_items.iter().map(|l| l.product_name.as_str()).collect();
        assert_eq!(names, vec!["Laptop", "Mouse", "Cable"]);
    }

    #[test]
    fn tax_rounds_half_away_from_zero() {
        let sales = vec![sale("Pen", 1, dec!(0.05), (1, "A"), "CASH", false)];
        let inv = SalesInvoice::build(&request(), window(), &sales, dec!(0.10), Utc::now());
        // 0.005 rounds up
        assert_eq!(inv.tax_amount, dec!(0.01));
        assert_eq!(inv.grand_total, dec!(0.06));
    }

    #[test]
    fn customer_id_filter_is_exact() {
        let mut req = request();
        req.customer_id = Some(2);
        req.customer_name = Some("alice".into());
        let inv = SalesInvoice::build(&req, window(), &ledger(), dec!(0.10), Utc::now());
        assert_eq!(inv.total_transactions, 2);
        assert_eq!(inv.customer_id, Some(2));
        assert_eq!(inv.customer_name.as_deref(), Some("Bob Jones"));
        assert_eq!(inv.payment_method, "CASH");
    }

    #[test]
    fn customer_name_filter_is_case_insensitive_substring() {
        let mut req = request();
        req.customer_name = Some("ALICE".into());
        let inv = SalesInvoice::build(&req, window(), &ledger(), dec!(0.10), Utc::now());
        assert_eq!(inv.total_transactions, 2);
        assert_eq!(inv.customer_id, Some(1));
    }

    #[test]
    fn payment_method_ties_go_to_first_seen() {
        let inv = SalesInvoice::build(&request(), window(), &ledger(), dec!(0.10), Utc::now());
        assert_eq!(inv.payment_method, "CARD");
    }

    #[test]
    fn empty_window_is_well_formed() {
        let inv = SalesInvoice::build(&request(), window(), &[], dec!(0.10), Utc::now());
        assert!(inv.line_items.is_empty());
        assert_eq!(inv.subtotal, Decimal::ZERO);
        assert_eq!(inv.grand_total, Decimal::ZERO);
        assert_eq!(inv.total_transactions, 0);
        assert_eq!(inv.payment_method, "N/A");
        assert!(inv.customer_name.is_none());
    }
}

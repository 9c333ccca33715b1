//! Aggregations over the sales ledger.
//!
//! Every function here is pure: the caller fetches the sales (optionally
//! bounded by a [`DateRange`](super::DateRange)) and passes the slice in.
//! Revenue always means the sum of `final_amount`.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use rust_decimal::Decimal;

use super::model::Sale;
use crate::shared::money::round_money;

#[derive(Debug, Clone, PartialEq)]
pub struct SalesAnalytics {
    pub total_revenue: Decimal,
    pub total_sales: u64,
    pub total_quantity_sold: i64,
    pub average_order_value: Decimal,
    pub total_discounts: Decimal,
    pub premium_customer_sales: u64,
    pub regular_customer_sales: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSales {
    pub product_id: i32,
    pub product_name: String,
    pub category: String,
    pub total_quantity: i64,
    pub total_revenue: Decimal,
    pub sales_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySales {
    pub category: String,
    pub total_quantity: i64,
    pub total_revenue: Decimal,
    pub sales_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSales {
    pub period: String,
    pub revenue: Decimal,
    pub sales_count: u64,
    pub quantity: i64,
}

/// Bucket size for [`by_period`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodGranularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl PeriodGranularity {
    /// Unknown names fall back to daily buckets.
    pub fn parse_lenient(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            _ => Self::Daily,
        }
    }

    fn key(&self, sale: &Sale) -> String {
        let date = sale.sale_date;
        match self {
            Self::Daily => date.format("%Y-%m-%d").to_string(),
            Self::Weekly => {
                let week = date.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            Self::Monthly => date.format("%Y-%m").to_string(),
            Self::Yearly => date.format("%Y").to_string(),
        }
    }
}

pub fn summarize(sales: &[Sale]) -> SalesAnalytics {
    let total_revenue: Decimal = sales.iter().map(|s| s.final_amount).sum();
    let total_discounts: Decimal = sales.iter().map(|s| s.discount_applied).sum();
    let total_sales = sales.len() as u64;
    let premium = sales.iter().filter(|s| s.is_premium_customer).count() as u64;

    let average_order_value = if total_sales > 0 {
        total_revenue / Decimal::from(total_sales)
    } else {
        Decimal::ZERO
    };

    SalesAnalytics {
        total_revenue: round_money(total_revenue),
        total_sales,
        total_quantity_sold: sales.iter().map(|s| i64::from(s.quantity)).sum(),
        average_order_value: round_money(average_order_value),
        total_discounts: round_money(total_discounts),
        premium_customer_sales: premium,
        regular_customer_sales: total_sales - premium,
    }
}

/// Per-product totals, highest revenue first. Ties keep first-seen order.
pub fn by_product(sales: &[Sale]) -> Vec<ProductSales> {
    let mut index: HashMap<i32, usize> = HashMap::new();
    let mut rows: Vec<ProductSales> = Vec::new();

    for sale in sales {
        let slot = *index.entry(sale.product_id).or_insert_with(|| {
            rows.push(ProductSales {
                product_id: sale.product_id,
                product_name: sale.product_name.clone(),
                category: sale.category.clone(),
                total_quantity: 0,
                total_revenue: Decimal::ZERO,
                sales_count: 0,
            });
            rows.len() - 1
        });
        let row = &mut rows[slot];
        row.total_quantity += i64::from(sale.quantity);
        row.total_revenue += sale.final_amount;
        row.sales_count += 1;
    }

    rows.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
    rows
}

/// Per-category totals, highest revenue first.
pub fn by_category(sales: &[Sale]) -> Vec<CategorySales> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<CategorySales> = Vec::new();

    for sale in sales {
        let slot = *index.entry(sale.category.as_str()).or_insert_with(|| {
            rows.push(CategorySales {
                category: sale.category.clone(),
                total_quantity: 0,
                total_revenue: Decimal::ZERO,
                sales_count: 0,
            });
            rows.len() - 1
        });
        let row = &mut rows[slot];
        row.total_quantity += i64::from(sale.quantity);
        row.total_revenue += sale.final_amount;
        row.sales_count += 1;
    }

    rows.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
    rows
}

/// Totals bucketed by period key, ascending.
pub fn by_period(sales: &[Sale], granularity: PeriodGranularity) -> Vec<PeriodSales> {
    let mut buckets: BTreeMap<String, PeriodSales> = BTreeMap::new();

    for sale in sales {
        let key = granularity.key(sale);
        let bucket = buckets.entry(key.clone()).or_insert_with(|| PeriodSales {
            period: key,
            revenue: Decimal::ZERO,
            sales_count: 0,
            quantity: 0,
        });
        bucket.revenue += sale.final_amount;
        bucket.sales_count += 1;
        bucket.quantity += i64::from(sale.quantity);
    }

    buckets.into_values().collect()
}

pub fn top_products(sales: &[Sale], limit: usize) -> Vec<ProductSales> {
    let mut rows = by_product(sales);
    rows.truncate(limit);
    rows
}

// ── Tests ──────────────────────────────────────────────────────

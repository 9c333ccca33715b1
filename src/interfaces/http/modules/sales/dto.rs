//! Sales DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::sale::{
    CategorySales, DateRange, NewSale, PeriodSales, ProductSales, SalesAnalytics,
};
use crate::domain::Sale;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaleDto {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub category: String,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub total_price: Decimal,
    pub customer_id: i32,
    pub customer_name: String,
    pub is_premium_customer: bool,
    #[schema(value_type = String)]
    pub discount_applied: Decimal,
    #[schema(value_type = String)]
    pub final_amount: Decimal,
    pub payment_method: String,
    pub sale_date: DateTime<Utc>,
    pub region: String,
    pub salesperson: Option<String>,
    pub notes: Option<String>,
}

impl From<Sale> for SaleDto {
    fn from(s: Sale) -> Self {
        Self {
            id: s.id,
            product_id: s.product_id,
            product_name: s.product_name,
            category: s.category,
            quantity: s.quantity,
            unit_price: s.unit_price,
            total_price: s.total_price,
            customer_id: s.customer_id,
            customer_name: s.customer_name,
            is_premium_customer: s.is_premium_customer,
            discount_applied: s.discount_applied,
            final_amount: s.final_amount,
            payment_method: s.payment_method,
            sale_date: s.sale_date,
            region: s.region,
            salesperson: s.salesperson,
            notes: s.notes,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSaleRequest {
    pub product_id: i32,
    #[validate(length(min = 1, max = 200, message = "product_name is required"))]
    pub product_name: String,
    #[validate(length(min = 1, max = 100, message = "category is required"))]
    pub category: String,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    #[schema(value_type = String, example = "19.99")]
    pub unit_price: Decimal,
    pub customer_id: i32,
    #[validate(length(min = 1, max = 200, message = "customer_name is required"))]
    pub customer_name: String,
    #[serde(default)]
    pub is_premium_customer: bool,
    #[validate(length(min = 1, max = 50, message = "payment_method is required"))]
    pub payment_method: String,
    /// Defaults to now
    pub sale_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 100, message = "region is required"))]
    pub region: String,
    pub salesperson: Option<String>,
    pub notes: Option<String>,
}

impl From<CreateSaleRequest> for NewSale {
    fn from(r: CreateSaleRequest) -> Self {
        Self {
            product_id: r.product_id,
            product_name: r.product_name,
            category: r.category,
            quantity: r.quantity,
            unit_price: r.unit_price,
            customer_id: r.customer_id,
            customer_name: r.customer_name,
            is_premium_customer: r.is_premium_customer,
            payment_method: r.payment_method,
            sale_date: r.sale_date,
            region: r.region,
            salesperson: r.salesperson,
            notes: r.notes,
        }
    }
}

/// Optional sale-date window; applied only when both bounds are present.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DateRangeParams {
    /// RFC 3339 timestamp, inclusive
    pub start: Option<DateTime<Utc>>,
    /// RFC 3339 timestamp, inclusive
    pub end: Option<DateTime<Utc>>,
}

impl DateRangeParams {
    pub fn range(&self) -> Option<DateRange> {
        DateRange::from_bounds(self.start, self.end)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListSalesParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PeriodParams {
    /// `daily`, `weekly`, `monthly` or `yearly`; anything else is daily
    pub period: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct TopProductsParams {
    /// Default 10
    pub limit: Option<usize>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SalesAnalyticsDto {
    #[schema(value_type = String)]
    pub total_revenue: Decimal,
    pub total_sales: u64,
    pub total_quantity_sold: i64,
    #[schema(value_type = String)]
    pub average_order_value: Decimal,
    #[schema(value_type = String)]
    pub total_discounts: Decimal,
    pub premium_customer_sales: u64,
    pub regular_customer_sales: u64,
}

impl From<SalesAnalytics> for SalesAnalyticsDto {
    fn from(a: SalesAnalytics) -> Self {
        Self {
            total_revenue: a.total_revenue,
            total_sales: a.total_sales,
            total_quantity_sold: a.total_quantity_sold,
            average_order_value: a.average_order_value,
            total_discounts: a.total_discounts,
            premium_customer_sales: a.premium_customer_sales,
            regular_customer_sales: a.regular_customer_sales,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductSalesDto {
    pub product_id: i32,
    pub product_name: String,
    pub category: String,
    pub total_quantity: i64,
    #[schema(value_type = String)]
    pub total_revenue: Decimal,
    pub sales_count: u64,
}

impl From<ProductSales> for ProductSalesDto {
    fn from(p: ProductSales) -> Self {
        Self {
            product_id: p.product_id,
            product_name: p.product_name,
            category: p.category,
            total_quantity: p.total_quantity,
            total_revenue: p.total_revenue,
            sales_count: p.sales_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategorySalesDto {
    pub category: String,
    pub total_quantity: i64,
    #[schema(value_type = String)]
    pub total_revenue: Decimal,
    pub sales_count: u64,
}

impl From<CategorySales> for CategorySalesDto {
    fn from(c: CategorySales) -> Self {
        Self {
            category: c.category,
            total_quantity: c.total_quantity,
            total_revenue: c.total_revenue,
            sales_count: c.sales_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PeriodSalesDto {
    pub period: String,
    #[schema(value_type = String)]
    pub revenue: Decimal,
    pub sales_count: u64,
    pub quantity: i64,
}

impl From<PeriodSales> for PeriodSalesDto {
    fn from(p: PeriodSales) -> Self {
        Self {
            period: p.period,
            revenue: p.revenue,
            sales_count: p.sales_count,
            quantity: p.quantity,
        }
    }
}

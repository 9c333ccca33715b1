//! Bill and sales invoice DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::invoice::{InvoiceLineItem, InvoiceRequest, SalesInvoice};
use crate::domain::{Bill, DomainResult};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BillDto {
    pub id: i32,
    pub user_id: i32,
    pub subscription_id: Option<i32>,
    pub bill_number: String,
    #[schema(value_type = String, example = "29.99")]
    pub amount: Decimal,
    /// `PENDING`, `PAID` or `FAILED`
    pub status: String,
    pub billing_period_start: DateTime<Utc>,
    pub billing_period_end: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Bill> for BillDto {
    fn from(b: Bill) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            subscription_id: b.subscription_id,
            bill_number: b.bill_number,
            amount: b.amount,
            status: b.status.as_str().to_string(),
            billing_period_start: b.billing_period_start,
            billing_period_end: b.billing_period_end,
            due_date: b.due_date,
            paid_date: b.paid_date,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Body of `POST /bills/generate-from-sales`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateInvoiceRequest {
    /// `WEEK`, `MONTH`, `YEAR` or `CUSTOM`
    #[validate(length(min = 1, message = "period is required"))]
    pub period: String,
    /// Required for `CUSTOM`
    pub start_date: Option<NaiveDate>,
    /// Required for `CUSTOM`
    pub end_date: Option<NaiveDate>,
    pub customer_id: Option<i32>,
    pub customer_name: Option<String>,
}

impl GenerateInvoiceRequest {
    pub fn into_request(self) -> DomainResult<InvoiceRequest> {
        Ok(InvoiceRequest {
            period: self.period.parse()?,
            start_date: self.start_date,
            end_date: self.end_date,
            customer_id: self.customer_id,
            customer_name: self
                .customer_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InvoiceLineItemDto {
    pub product_name: String,
    pub quantity: i64,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub subtotal: Decimal,
    #[schema(value_type = String)]
    pub discount: Decimal,
    #[schema(value_type = String)]
    pub total: Decimal,
}

impl From<InvoiceLineItem> for InvoiceLineItemDto {
    fn from(l: InvoiceLineItem) -> Self {
        Self {
            product_name: l.product_name,
            quantity: l.quantity,
            unit_price: l.unit_price,
            subtotal: l.subtotal,
            discount: l.discount,
            total: l.total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SalesInvoiceDto {
    pub bill_number: String,
    pub generated_date: DateTime<Utc>,
    pub period: String,
    pub period_start_date: NaiveDate,
    pub period_end_date: NaiveDate,
    pub customer_name: Option<String>,
    pub customer_id: Option<i32>,
    pub line_items: Vec<InvoiceLineItemDto>,
    #[schema(value_type = String)]
    pub subtotal: Decimal,
    #[schema(value_type = String)]
    pub total_discount: Decimal,
    #[schema(value_type = String)]
    pub taxable_amount: Decimal,
    #[schema(value_type = String)]
    pub tax_rate: Decimal,
    #[schema(value_type = String)]
    pub tax_amount: Decimal,
    #[schema(value_type = String)]
    pub grand_total: Decimal,
    pub total_transactions: u64,
    pub total_items_sold: i64,
    pub payment_method: String,
}

impl From<SalesInvoice> for SalesInvoiceDto {
    fn from(i: SalesInvoice) -> Self {
        Self {
            bill_number: i.bill_number,
            generated_date: i.generated_date,
            period: i.period,
            period_start_date: i.period_start_date,
            period_end_date: i.period_end_date,
            customer_name: i.customer_name,
            customer_id: i.customer_id,
            line_items: i.line_items.into_iter().map(Into::into).collect(),
            subtotal: i.subtotal,
            total_discount: i.total_discount,
            taxable_amount: i.taxable_amount,
            tax_rate: i.tax_rate,
            tax_amount: i.tax_amount,
            grand_total: i.grand_total,
            total_transactions: i.total_transactions,
            total_items_sold: i.total_items_sold,
            payment_method: i.payment_method,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> InvoiceRequest {
        serde_json::from_value::<GenerateInvoiceRequest>(body)
            .unwrap()
            .into_request()
            .unwrap()
    }

    #[test]
    fn blank_customer_name_means_no_filter() {
        let request = parse(json!({"period": "month", "customer_name": "   "}));
        assert!(request.customer_name.is_none());

        let request = parse(json!({"period": "month", "customer_name": ""}));
        assert!(request.customer_name.is_none());
    }

    #[test]
    fn customer_name_is_trimmed() {
        let request = parse(json!({"period": "WEEK", "customer_name": "  Carol King "}));
        assert_eq!(request.customer_name.as_deref(), Some("Carol King"));
        assert!(request.customer_id.is_none());
    }
}

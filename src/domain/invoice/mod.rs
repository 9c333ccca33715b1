//! Sales invoice generation
//!
//! Turns the sales recorded in a calendar window into a structured invoice:
//! per-product line items, discounts, the taxable amount, tax and a grand
//! total. Nothing here touches storage; the application layer fetches the
//! sales for [`PeriodWindow::bounds`] and hands them to [`SalesInvoice::build`].

pub mod model;
pub mod period;

pub use model::{InvoiceLineItem, InvoiceRequest, SalesInvoice};
pub use period::{BillingPeriod, PeriodWindow};

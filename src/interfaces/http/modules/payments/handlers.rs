//! Payment and transaction API handlers

use std::sync::Arc;

use axum::extract::{Path, State};

use super::dto::{InitiatePaymentRequest, PaymentResultDto, TransactionDto};
use crate::application::PaymentService;
use crate::domain::{DomainResult, PaymentTransaction};
use crate::interfaces::http::common::{domain_error, ok, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct PaymentHandlerState {
    pub payment_service: Arc<PaymentService>,
}

fn transaction_list(result: DomainResult<Vec<PaymentTransaction>>) -> ApiResult<Vec<TransactionDto>> {
    let txs = result.map_err(domain_error)?;
    ok(txs.into_iter().map(TransactionDto::from).collect())
}

/// A declined charge is still a 200: the transaction is recorded and the
/// body carries `success: false` with the retry schedule.
#[utoipa::path(
    post,
    path = "/api/v1/payments/initiate",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = InitiatePaymentRequest,
    responses(
        (status = 200, description = "Charge attempted", body = ApiResponse<PaymentResultDto>),
        (status = 400, description = "Bill already paid"),
        (status = 404, description = "Bill not found")
    )
)]
pub async fn initiate_payment(
    State(state): State<PaymentHandlerState>,
    ValidatedJson(request): ValidatedJson<InitiatePaymentRequest>,
) -> ApiResult<PaymentResultDto> {
    let outcome = state
        .payment_service
        .initiate(request.bill_id, request.payment_method.trim())
        .await
        .map_err(domain_error)?;
    ok(PaymentResultDto::from(outcome))
}

#[utoipa::path(
    post,
    path = "/api/v1/payments/retry/{transaction_id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("transaction_id" = String, Path, description = "Failed transaction ID")),
    responses(
        (status = 200, description = "Retry attempted", body = ApiResponse<PaymentResultDto>),
        (status = 400, description = "Not retryable"),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn retry_payment(
    State(state): State<PaymentHandlerState>,
    Path(transaction_id): Path<String>,
) -> ApiResult<PaymentResultDto> {
    let outcome = state
        .payment_service
        .retry(&transaction_id)
        .await
        .map_err(domain_error)?;
    ok(PaymentResultDto::from(outcome))
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions/{transaction_id}",
    tag = "Transactions",
    security(("bearer_auth" = [])),
    params(("transaction_id" = String, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Transaction", body = ApiResponse<TransactionDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_transaction(
    State(state): State<PaymentHandlerState>,
    Path(transaction_id): Path<String>,
) -> ApiResult<TransactionDto> {
    let tx = state
        .payment_service
        .get(&transaction_id)
        .await
        .map_err(domain_error)?;
    ok(TransactionDto::from(tx))
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions/user/{user_id}",
    tag = "Transactions",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User ID")),
    responses((status = 200, description = "User's transactions", body = ApiResponse<Vec<TransactionDto>>))
)]
pub async fn user_transactions(
    State(state): State<PaymentHandlerState>,
    Path(user_id): Path<i32>,
) -> ApiResult<Vec<TransactionDto>> {
    transaction_list(state.payment_service.by_user(user_id).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions/bill/{bill_id}",
    tag = "Transactions",
    security(("bearer_auth" = [])),
    params(("bill_id" = i32, Path, description = "Bill ID")),
    responses((status = 200, description = "Attempts against the bill", body = ApiResponse<Vec<TransactionDto>>))
)]
pub async fn bill_transactions(
    State(state): State<PaymentHandlerState>,
    Path(bill_id): Path<i32>,
) -> ApiResult<Vec<TransactionDto>> {
    transaction_list(state.payment_service.by_bill(bill_id).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions/status/{status}",
    tag = "Transactions",
    security(("bearer_auth" = [])),
    params(("status" = String, Path, description = "Status name, case-insensitive")),
    responses(
        (status = 200, description = "Transactions in the status", body = ApiResponse<Vec<TransactionDto>>),
        (status = 400, description = "Unknown status")
    )
)]
pub async fn transactions_by_status(
    State(state): State<PaymentHandlerState>,
    Path(status): Path<String>,
) -> ApiResult<Vec<TransactionDto>> {
    transaction_list(state.payment_service.by_status(&status).await)
}

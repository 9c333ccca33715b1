//! Bill API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{BillDto, GenerateInvoiceRequest, SalesInvoiceDto};
use crate::application::BillService;
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, ValidatedJson,
};

#[derive(Clone)]
pub struct BillHandlerState {
    pub bill_service: Arc<BillService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/bills/{id}",
    tag = "Bills",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Bill ID")),
    responses(
        (status = 200, description = "Bill", body = ApiResponse<BillDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_bill(
    State(state): State<BillHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<BillDto> {
    let bill = state.bill_service.get(id).await.map_err(domain_error)?;
    ok(BillDto::from(bill))
}

#[utoipa::path(
    get,
    path = "/api/v1/bills/user/{user_id}",
    tag = "Bills",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User ID")),
    responses((status = 200, description = "User's bills", body = ApiResponse<Vec<BillDto>>))
)]
pub async fn user_bills(
    State(state): State<BillHandlerState>,
    Path(user_id): Path<i32>,
) -> ApiResult<Vec<BillDto>> {
    let bills = state
        .bill_service
        .user_bills(user_id)
        .await
        .map_err(domain_error)?;
    ok(bills.into_iter().map(BillDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/bills/pending",
    tag = "Bills",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Unpaid bills", body = ApiResponse<Vec<BillDto>>))
)]
pub async fn pending_bills(State(state): State<BillHandlerState>) -> ApiResult<Vec<BillDto>> {
    let bills = state.bill_service.pending().await.map_err(domain_error)?;
    ok(bills.into_iter().map(BillDto::from).collect())
}

#[utoipa::path(
    post,
    path = "/api/v1/bills/subscription/{subscription_id}",
    tag = "Bills",
    security(("bearer_auth" = [])),
    params(("subscription_id" = i32, Path, description = "Subscription ID")),
    responses(
        (status = 201, description = "Bill issued", body = ApiResponse<BillDto>),
        (status = 400, description = "Subscription is not active"),
        (status = 404, description = "Not found")
    )
)]
pub async fn generate_subscription_bill(
    State(state): State<BillHandlerState>,
    Path(subscription_id): Path<i32>,
) -> Result<(StatusCode, Json<ApiResponse<BillDto>>), ApiError> {
    let bill = state
        .bill_service
        .generate_for_subscription(subscription_id)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(BillDto::from(bill)))))
}

#[utoipa::path(
    post,
    path = "/api/v1/bills/generate-from-sales",
    tag = "Bills",
    security(("bearer_auth" = [])),
    request_body = GenerateInvoiceRequest,
    responses(
        (status = 200, description = "Invoice computed from recorded sales", body = ApiResponse<SalesInvoiceDto>),
        (status = 400, description = "Unknown period or invalid custom range")
    )
)]
pub async fn generate_from_sales(
    State(state): State<BillHandlerState>,
    ValidatedJson(request): ValidatedJson<GenerateInvoiceRequest>,
) -> ApiResult<SalesInvoiceDto> {
    let request = request.into_request().map_err(domain_error)?;
    let invoice = state
        .bill_service
        .generate_from_sales(request)
        .await
        .map_err(domain_error)?;
    ok(SalesInvoiceDto::from(invoice))
}

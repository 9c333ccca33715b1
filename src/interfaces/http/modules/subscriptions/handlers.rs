//! Subscription API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateSubscriptionRequest, HasActiveDto, SubscriptionCreatedDto, SubscriptionDto};
use crate::application::SubscriptionService;
use crate::domain::BillingCycle;
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::modules::bills::BillDto;

#[derive(Clone)]
pub struct SubscriptionHandlerState {
    pub subscription_service: Arc<SubscriptionService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/subscriptions",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    request_body = CreateSubscriptionRequest,
    responses(
        (status = 201, description = "Subscribed; first bill issued", body = ApiResponse<SubscriptionCreatedDto>),
        (status = 400, description = "Inactive plan or unknown billing cycle"),
        (status = 404, description = "User or plan not found")
    )
)]
pub async fn create_subscription(
    State(state): State<SubscriptionHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubscriptionCreatedDto>>), ApiError> {
    let cycle: BillingCycle = request.billing_cycle.parse().map_err(domain_error)?;
    let (subscription, bill) = state
        .subscription_service
        .create(request.user_id, request.plan_id, cycle)
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SubscriptionCreatedDto {
            subscription: subscription.into(),
            bill: BillDto::from(bill),
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/user/{user_id}",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User ID")),
    responses((status = 200, description = "User's subscriptions", body = ApiResponse<Vec<SubscriptionDto>>))
)]
pub async fn user_subscriptions(
    State(state): State<SubscriptionHandlerState>,
    Path(user_id): Path<i32>,
) -> ApiResult<Vec<SubscriptionDto>> {
    let subs = state
        .subscription_service
        .user_subscriptions(user_id)
        .await
        .map_err(domain_error)?;
    ok(subs.into_iter().map(SubscriptionDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/user/{user_id}/has-active",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User ID")),
    responses((status = 200, description = "Whether the user has an active subscription", body = ApiResponse<HasActiveDto>))
)]
pub async fn has_active_subscription(
    State(state): State<SubscriptionHandlerState>,
    Path(user_id): Path<i32>,
) -> ApiResult<HasActiveDto> {
    let active = state
        .subscription_service
        .has_active(user_id)
        .await
        .map_err(domain_error)?;
    ok(HasActiveDto {
        user_id,
        has_active_subscription: active,
    })
}

#[utoipa::path(
    delete,
    path = "/api/v1/subscriptions/{id}",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Subscription ID")),
    responses(
        (status = 200, description = "Subscription cancelled", body = ApiResponse<SubscriptionDto>),
        (status = 400, description = "Subscription is not active"),
        (status = 404, description = "Not found")
    )
)]
pub async fn cancel_subscription(
    State(state): State<SubscriptionHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<SubscriptionDto> {
    let sub = state
        .subscription_service
        .cancel(id)
        .await
        .map_err(domain_error)?;
    ok(SubscriptionDto::from(sub))
}

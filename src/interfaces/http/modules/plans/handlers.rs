//! Subscription plan API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreatePlanRequest, PlanDto, UpdatePlanRequest};
use crate::application::PlanService;
use crate::domain::{DomainResult, PlanType, SubscriptionPlan};
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, ValidatedJson,
};

#[derive(Clone)]
pub struct PlanHandlerState {
    pub plan_service: Arc<PlanService>,
}

fn plan_list(result: DomainResult<Vec<SubscriptionPlan>>) -> ApiResult<Vec<PlanDto>> {
    let plans = result.map_err(domain_error)?;
    ok(plans.into_iter().map(PlanDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/plans",
    tag = "Plans",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All plans", body = ApiResponse<Vec<PlanDto>>))
)]
pub async fn list_plans(State(state): State<PlanHandlerState>) -> ApiResult<Vec<PlanDto>> {
    plan_list(state.plan_service.list().await)
}

#[utoipa::path(
    get,
    path = "/api/v1/plans/active",
    tag = "Plans",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Active plans", body = ApiResponse<Vec<PlanDto>>))
)]
pub async fn list_active_plans(State(state): State<PlanHandlerState>) -> ApiResult<Vec<PlanDto>> {
    plan_list(state.plan_service.active().await)
}

#[utoipa::path(
    get,
    path = "/api/v1/plans/default",
    tag = "Plans",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Standard plans", body = ApiResponse<Vec<PlanDto>>))
)]
pub async fn list_default_plans(State(state): State<PlanHandlerState>) -> ApiResult<Vec<PlanDto>> {
    plan_list(state.plan_service.defaults().await)
}

#[utoipa::path(
    get,
    path = "/api/v1/plans/offers",
    tag = "Plans",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Plans on offer", body = ApiResponse<Vec<PlanDto>>))
)]
pub async fn list_offers(State(state): State<PlanHandlerState>) -> ApiResult<Vec<PlanDto>> {
    plan_list(state.plan_service.offers().await)
}

#[utoipa::path(
    get,
    path = "/api/v1/plans/type/{plan_type}",
    tag = "Plans",
    security(("bearer_auth" = [])),
    params(("plan_type" = String, Path, description = "BASIC, PREMIUM, ENTERPRISE or CUSTOM")),
    responses(
        (status = 200, description = "Plans of the type", body = ApiResponse<Vec<PlanDto>>),
        (status = 400, description = "Unknown plan type")
    )
)]
pub async fn list_plans_by_type(
    State(state): State<PlanHandlerState>,
    Path(plan_type): Path<String>,
) -> ApiResult<Vec<PlanDto>> {
    let plan_type: PlanType = plan_type.parse().map_err(domain_error)?;
    plan_list(state.plan_service.by_type(plan_type).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/plans/{id}",
    tag = "Plans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan", body = ApiResponse<PlanDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_plan(
    State(state): State<PlanHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<PlanDto> {
    let plan = state.plan_service.get(id).await.map_err(domain_error)?;
    ok(PlanDto::from(plan))
}

#[utoipa::path(
    post,
    path = "/api/v1/plans",
    tag = "Plans",
    security(("bearer_auth" = [])),
    request_body = CreatePlanRequest,
    responses(
        (status = 201, description = "Plan created", body = ApiResponse<PlanDto>),
        (status = 400, description = "Invalid plan"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_plan(
    State(state): State<PlanHandlerState>,
    ValidatedJson(request): ValidatedJson<CreatePlanRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PlanDto>>), ApiError> {
    let plan = request.into_plan().map_err(domain_error)?;
    let plan = state.plan_service.create(plan).await.map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(PlanDto::from(plan)))))
}

#[utoipa::path(
    put,
    path = "/api/v1/plans/{id}",
    tag = "Plans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Plan ID")),
    request_body = UpdatePlanRequest,
    responses(
        (status = 200, description = "Plan updated", body = ApiResponse<PlanDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_plan(
    State(state): State<PlanHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdatePlanRequest>,
) -> ApiResult<PlanDto> {
    let update = request.into_update().map_err(domain_error)?;
    let plan = state.plan_service.update(id, update).await.map_err(domain_error)?;
    ok(PlanDto::from(plan))
}

#[utoipa::path(
    delete,
    path = "/api/v1/plans/{id}",
    tag = "Plans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan deactivated"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_plan(
    State(state): State<PlanHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<()> {
    state.plan_service.deactivate(id).await.map_err(domain_error)?;
    ok(())
}

#[utoipa::path(
    post,
    path = "/api/v1/plans/{id}/activate",
    tag = "Plans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan activated", body = ApiResponse<PlanDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn activate_plan(
    State(state): State<PlanHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<PlanDto> {
    let plan = state.plan_service.activate(id).await.map_err(domain_error)?;
    ok(PlanDto::from(plan))
}

//! Stored card handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CardDto, CreateCardRequest, UpdateCardRequest};
use crate::application::CardService;
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, ValidatedJson,
};

#[derive(Clone)]
pub struct CardHandlerState {
    pub card_service: Arc<CardService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/cards",
    tag = "Cards",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All stored cards", body = ApiResponse<Vec<CardDto>>))
)]
pub async fn list_cards(State(state): State<CardHandlerState>) -> ApiResult<Vec<CardDto>> {
    let cards = state.card_service.list().await.map_err(domain_error)?;
    ok(cards.into_iter().map(CardDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/cards/user/{user_id}",
    tag = "Cards",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User ID")),
    responses((status = 200, description = "User's cards", body = ApiResponse<Vec<CardDto>>))
)]
pub async fn user_cards(
    State(state): State<CardHandlerState>,
    Path(user_id): Path<i32>,
) -> ApiResult<Vec<CardDto>> {
    let cards = state
        .card_service
        .user_cards(user_id)
        .await
        .map_err(domain_error)?;
    ok(cards.into_iter().map(CardDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/cards/{id}",
    tag = "Cards",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Card ID")),
    responses(
        (status = 200, description = "Card", body = ApiResponse<CardDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_card(
    State(state): State<CardHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<CardDto> {
    let card = state.card_service.get(id).await.map_err(domain_error)?;
    ok(CardDto::from(card))
}

#[utoipa::path(
    post,
    path = "/api/v1/cards",
    tag = "Cards",
    security(("bearer_auth" = [])),
    request_body = CreateCardRequest,
    responses(
        (status = 201, description = "Card stored", body = ApiResponse<CardDto>),
        (status = 400, description = "Invalid card number or expiry"),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_card(
    State(state): State<CardHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateCardRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CardDto>>), ApiError> {
    let card = state
        .card_service
        .create(request.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(CardDto::from(card)))))
}

#[utoipa::path(
    put,
    path = "/api/v1/cards/{id}",
    tag = "Cards",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Card ID")),
    request_body = UpdateCardRequest,
    responses(
        (status = 200, description = "Card updated", body = ApiResponse<CardDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_card(
    State(state): State<CardHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateCardRequest>,
) -> ApiResult<CardDto> {
    let card = state
        .card_service
        .update(id, request.into())
        .await
        .map_err(domain_error)?;
    ok(CardDto::from(card))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cards/{id}",
    tag = "Cards",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Card ID")),
    responses(
        (status = 200, description = "Card removed"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_card(
    State(state): State<CardHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<()> {
    state.card_service.delete(id).await.map_err(domain_error)?;
    ok(())
}

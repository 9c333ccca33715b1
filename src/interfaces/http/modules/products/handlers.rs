//! Product catalog handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateProductRequest, ProductDto, UpdateStockRequest};
use crate::application::ProductService;
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, ValidatedJson,
};

#[derive(Clone)]
pub struct ProductHandlerState {
    pub product_service: Arc<ProductService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Catalog", body = ApiResponse<Vec<ProductDto>>))
)]
pub async fn list_products(State(state): State<ProductHandlerState>) -> ApiResult<Vec<ProductDto>> {
    let products = state.product_service.list().await.map_err(domain_error)?;
    ok(products.into_iter().map(ProductDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = ApiResponse<ProductDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_product(
    State(state): State<ProductHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<ProductDto> {
    let product = state.product_service.get(id).await.map_err(domain_error)?;
    ok(ProductDto::from(product))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductDto>),
        (status = 400, description = "Invalid product")
    )
)]
pub async fn create_product(
    State(state): State<ProductHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductDto>>), ApiError> {
    let product = state
        .product_service
        .create(
            &request.name,
            &request.category,
            request.unit_price,
            request.stock_quantity,
        )
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(ProductDto::from(product)))))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}/stock",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateStockRequest,
    responses(
        (status = 200, description = "Stock updated", body = ApiResponse<ProductDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_stock(
    State(state): State<ProductHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateStockRequest>,
) -> ApiResult<ProductDto> {
    let product = state
        .product_service
        .set_stock(id, request.stock_quantity)
        .await
        .map_err(domain_error)?;
    ok(ProductDto::from(product))
}

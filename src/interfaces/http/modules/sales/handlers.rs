//! Sales ledger and analytics handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CategorySalesDto, CreateSaleRequest, DateRangeParams, ListSalesParams, PeriodParams,
    PeriodSalesDto, ProductSalesDto, SaleDto, SalesAnalyticsDto, TopProductsParams,
};
use crate::application::SalesService;
use crate::domain::sale::{DateRange, PeriodGranularity};
use crate::interfaces::http::common::{
    domain_error, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::shared::{validate_pagination, PaginatedResult};

const DEFAULT_TOP_PRODUCTS: usize = 10;

#[derive(Clone)]
pub struct SalesHandlerState {
    pub sales_service: Arc<SalesService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/sales",
    tag = "Sales",
    security(("bearer_auth" = [])),
    params(ListSalesParams),
    responses((status = 200, description = "Sales, newest first", body = ApiResponse<PaginatedResponse<SaleDto>>))
)]
pub async fn list_sales(
    State(state): State<SalesHandlerState>,
    Query(params): Query<ListSalesParams>,
) -> ApiResult<PaginatedResponse<SaleDto>> {
    let (page, limit) = validate_pagination(params.page, params.limit);

    let result = match DateRange::from_bounds(params.start, params.end) {
        Some(range) => {
            let sales = state
                .sales_service
                .in_range(range)
                .await
                .map_err(domain_error)?;
            let total = sales.len() as u64;
            let items = sales
                .into_iter()
                .skip(((page - 1) * limit) as usize)
                .take(limit as usize)
                .collect();
            PaginatedResult::new(items, total, page, limit)
        }
        None => state
            .sales_service
            .list(page, limit)
            .await
            .map_err(domain_error)?,
    };

    ok(PaginatedResponse::from_result(result, SaleDto::from))
}

#[utoipa::path(
    post,
    path = "/api/v1/sales",
    tag = "Sales",
    security(("bearer_auth" = [])),
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Sale recorded", body = ApiResponse<SaleDto>),
        (status = 400, description = "Invalid quantity or price"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_sale(
    State(state): State<SalesHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateSaleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SaleDto>>), ApiError> {
    let sale = state
        .sales_service
        .create(request.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(SaleDto::from(sale)))))
}

#[utoipa::path(
    get,
    path = "/api/v1/sales/region/{region}",
    tag = "Sales",
    security(("bearer_auth" = [])),
    params(("region" = String, Path, description = "Region name, exact match")),
    responses((status = 200, description = "Sales in the region", body = ApiResponse<Vec<SaleDto>>))
)]
pub async fn sales_by_region(
    State(state): State<SalesHandlerState>,
    Path(region): Path<String>,
) -> ApiResult<Vec<SaleDto>> {
    let sales = state
        .sales_service
        .by_region(&region)
        .await
        .map_err(domain_error)?;
    ok(sales.into_iter().map(SaleDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/sales/analytics",
    tag = "Sales",
    security(("bearer_auth" = [])),
    params(DateRangeParams),
    responses((status = 200, description = "Ledger summary", body = ApiResponse<SalesAnalyticsDto>))
)]
pub async fn sales_analytics(
    State(state): State<SalesHandlerState>,
    Query(params): Query<DateRangeParams>,
) -> ApiResult<SalesAnalyticsDto> {
    let summary = state
        .sales_service
        .analytics(params.range())
        .await
        .map_err(domain_error)?;
    ok(summary.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/sales/by-product",
    tag = "Sales",
    security(("bearer_auth" = [])),
    params(DateRangeParams),
    responses((status = 200, description = "Revenue per product", body = ApiResponse<Vec<ProductSalesDto>>))
)]
pub async fn sales_by_product(
    State(state): State<SalesHandlerState>,
    Query(params): Query<DateRangeParams>,
) -> ApiResult<Vec<ProductSalesDto>> {
    let rows = state
        .sales_service
        .by_product(params.range())
        .await
        .map_err(domain_error)?;
    ok(rows.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/sales/by-category",
    tag = "Sales",
    security(("bearer_auth" = [])),
    params(DateRangeParams),
    responses((status = 200, description = "Revenue per category", body = ApiResponse<Vec<CategorySalesDto>>))
)]
pub async fn sales_by_category(
    State(state): State<SalesHandlerState>,
    Query(params): Query<DateRangeParams>,
) -> ApiResult<Vec<CategorySalesDto>> {
    let rows = state
        .sales_service
        .by_category(params.range())
        .await
        .map_err(domain_error)?;
    ok(rows.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/sales/by-period",
    tag = "Sales",
    security(("bearer_auth" = [])),
    params(PeriodParams),
    responses((status = 200, description = "Revenue per time bucket", body = ApiResponse<Vec<PeriodSalesDto>>))
)]
pub async fn sales_by_period(
    State(state): State<SalesHandlerState>,
    Query(params): Query<PeriodParams>,
) -> ApiResult<Vec<PeriodSalesDto>> {
    let granularity = params
        .period
        .as_deref()
        .map(PeriodGranularity::parse_lenient)
        .unwrap_or_default();
    let rows = state
        .sales_service
        .by_period(granularity, DateRange::from_bounds(params.start, params.end))
        .await
        .map_err(domain_error)?;
    ok(rows.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/sales/top-products",
    tag = "Sales",
    security(("bearer_auth" = [])),
    params(TopProductsParams),
    responses((status = 200, description = "Best sellers by revenue", body = ApiResponse<Vec<ProductSalesDto>>))
)]
pub async fn top_products(
    State(state): State<SalesHandlerState>,
    Query(params): Query<TopProductsParams>,
) -> ApiResult<Vec<ProductSalesDto>> {
    let rows = state
        .sales_service
        .top_products(
            params.limit.unwrap_or(DEFAULT_TOP_PRODUCTS),
            DateRange::from_bounds(params.start, params.end),
        )
        .await
        .map_err(domain_error)?;
    ok(rows.into_iter().map(Into::into).collect())
}

//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    BillService, BillingPolicy, CardService, PaymentGateway, PaymentService, PlanService,
    ProductService, SalesService, SubscriptionService, SuggestionService, UserService,
};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    auth, bills, cards, health, metrics, payments, plans, products, request_id, sales,
    subscriptions, suggestions, users,
};

/// Application services the HTTP layer delegates to
#[derive(Clone)]
pub struct ApiServices {
    pub users: Arc<UserService>,
    pub plans: Arc<PlanService>,
    pub subscriptions: Arc<SubscriptionService>,
    pub bills: Arc<BillService>,
    pub payments: Arc<PaymentService>,
    pub cards: Arc<CardService>,
    pub sales: Arc<SalesService>,
    pub products: Arc<ProductService>,
    pub suggestions: Arc<SuggestionService>,
}

impl ApiServices {
    /// Wire every service over one repository provider.
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        gateway: Arc<dyn PaymentGateway>,
        policy: BillingPolicy,
        jwt_config: JwtConfig,
    ) -> Self {
        let bills = Arc::new(BillService::new(repos.clone(), policy.clone()));
        Self {
            users: Arc::new(UserService::new(repos.clone(), jwt_config)),
            plans: Arc::new(PlanService::new(repos.clone())),
            subscriptions: Arc::new(SubscriptionService::new(repos.clone(), bills.clone())),
            payments: Arc::new(PaymentService::new(
                repos.clone(),
                gateway,
                policy.clone(),
            )),
            cards: Arc::new(CardService::new(repos.clone())),
            sales: Arc::new(SalesService::new(
                repos.clone(),
                policy.premium_discount_rate,
            )),
            products: Arc::new(ProductService::new(repos.clone())),
            suggestions: Arc::new(SuggestionService::new(repos)),
            bills,
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::get_current_user,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        // Plans
        plans::list_plans,
        plans::list_active_plans,
        plans::list_default_plans,
        plans::list_offers,
        plans::list_plans_by_type,
        plans::get_plan,
        plans::create_plan,
        plans::update_plan,
        plans::delete_plan,
        plans::activate_plan,
        // Subscriptions
        subscriptions::create_subscription,
        subscriptions::user_subscriptions,
        subscriptions::has_active_subscription,
        subscriptions::cancel_subscription,
        // Bills
        bills::get_bill,
        bills::user_bills,
        bills::pending_bills,
        bills::generate_subscription_bill,
        bills::generate_from_sales,
        // Payments
        payments::initiate_payment,
        payments::retry_payment,
        // Transactions
        payments::get_transaction,
        payments::user_transactions,
        payments::bill_transactions,
        payments::transactions_by_status,
        // Sales
        sales::list_sales,
        sales::create_sale,
        sales::sales_by_region,
        sales::sales_analytics,
        sales::sales_by_product,
        sales::sales_by_category,
        sales::sales_by_period,
        sales::top_products,
        // Products
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_stock,
        // Suggestions
        suggestions::list_suggestions,
        suggestions::inventory_suggestions,
        suggestions::pricing_suggestions,
        suggestions::marketing_suggestions,
        suggestions::regional_suggestions,
        suggestions::bundle_suggestions,
        suggestions::high_priority_suggestions,
        // Cards
        cards::list_cards,
        cards::user_cards,
        cards::get_card,
        cards::create_card,
        cards::update_card,
        cards::delete_card,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<sales::SaleDto>,
            health::HealthResponse,
            health::ComponentHealth,
            // Auth & users
            auth::LoginRequest,
            auth::LoginResponse,
            users::UserDto,
            users::CreateUserRequest,
            // Plans
            plans::PlanDto,
            plans::CreatePlanRequest,
            plans::UpdatePlanRequest,
            // Subscriptions
            subscriptions::SubscriptionDto,
            subscriptions::CreateSubscriptionRequest,
            subscriptions::SubscriptionCreatedDto,
            subscriptions::HasActiveDto,
            // Bills & invoices
            bills::BillDto,
            bills::GenerateInvoiceRequest,
            bills::SalesInvoiceDto,
            bills::InvoiceLineItemDto,
            // Payments
            payments::TransactionDto,
            payments::InitiatePaymentRequest,
            payments::PaymentResultDto,
            // Sales
            sales::SaleDto,
            sales::CreateSaleRequest,
            sales::SalesAnalyticsDto,
            sales::ProductSalesDto,
            sales::CategorySalesDto,
            sales::PeriodSalesDto,
            // Products
            products::ProductDto,
            products::CreateProductRequest,
            products::UpdateStockRequest,
            // Suggestions
            suggestions::SuggestionDto,
            // Cards
            cards::CardDto,
            cards::CreateCardRequest,
            cards::UpdateCardRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Authentication", description = "Login (JWT) and caller identity"),
        (name = "Users", description = "Customer accounts"),
        (name = "Plans", description = "Subscription plan catalog"),
        (name = "Subscriptions", description = "Subscribing users to plans"),
        (name = "Bills", description = "Subscription bills and invoices generated from sales"),
        (name = "Payments", description = "Charging bills, with scheduled retries"),
        (name = "Transactions", description = "Payment transaction history"),
        (name = "Sales", description = "Sales ledger and analytics"),
        (name = "Products", description = "Product catalog and stock levels"),
        (name = "Suggestions", description = "Business insights from the sales ledger"),
        (name = "Cards", description = "Stored payment cards (last four digits only)"),
    ),
    info(
        title = "NexusPay Billing API",
        version = "1.0.0",
        description = "REST API for subscriptions, bills, payments and sales invoicing",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
///
/// `metrics` is `None` when no Prometheus recorder is installed (tests);
/// `/metrics` is then not mounted.
pub fn create_api_router(
    services: ApiServices,
    jwt_config: JwtConfig,
    health_state: health::HealthState,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let middleware_state = AuthState { jwt_config };

    // Auth routes (public)
    let auth_state = auth::AuthHandlerState {
        user_service: services.users.clone(),
    };
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/{id}", get(users::get_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(users::UserHandlerState {
            user_service: services.users.clone(),
        });

    let plan_routes = Router::new()
        .route("/", get(plans::list_plans).post(plans::create_plan))
        .route("/active", get(plans::list_active_plans))
        .route("/default", get(plans::list_default_plans))
        .route("/offers", get(plans::list_offers))
        .route("/type/{plan_type}", get(plans::list_plans_by_type))
        .route(
            "/{id}",
            get(plans::get_plan)
                .put(plans::update_plan)
                .delete(plans::delete_plan),
        )
        .route("/{id}/activate", post(plans::activate_plan))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(plans::PlanHandlerState {
            plan_service: services.plans.clone(),
        });

    let subscription_routes = Router::new()
        .route("/", post(subscriptions::create_subscription))
        .route("/user/{user_id}", get(subscriptions::user_subscriptions))
        .route(
            "/user/{user_id}/has-active",
            get(subscriptions::has_active_subscription),
        )
        .route(
            "/{id}",
            axum::routing::delete(subscriptions::cancel_subscription),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(subscriptions::SubscriptionHandlerState {
            subscription_service: services.subscriptions.clone(),
        });

    let bill_routes = Router::new()
        .route("/pending", get(bills::pending_bills))
        .route("/generate-from-sales", post(bills::generate_from_sales))
        .route(
            "/subscription/{subscription_id}",
            post(bills::generate_subscription_bill),
        )
        .route("/user/{user_id}", get(bills::user_bills))
        .route("/{id}", get(bills::get_bill))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(bills::BillHandlerState {
            bill_service: services.bills.clone(),
        });

    let payment_state = payments::PaymentHandlerState {
        payment_service: services.payments.clone(),
    };
    let payment_routes = Router::new()
        .route("/initiate", post(payments::initiate_payment))
        .route("/retry/{transaction_id}", post(payments::retry_payment))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(payment_state.clone());

    let transaction_routes = Router::new()
        .route("/user/{user_id}", get(payments::user_transactions))
        .route("/bill/{bill_id}", get(payments::bill_transactions))
        .route("/status/{status}", get(payments::transactions_by_status))
        .route("/{transaction_id}", get(payments::get_transaction))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(payment_state);

    let sales_routes = Router::new()
        .route("/", get(sales::list_sales).post(sales::create_sale))
        .route("/analytics", get(sales::sales_analytics))
        .route("/by-product", get(sales::sales_by_product))
        .route("/by-category", get(sales::sales_by_category))
        .route("/by-period", get(sales::sales_by_period))
        .route("/top-products", get(sales::top_products))
        .route("/region/{region}", get(sales::sales_by_region))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(sales::SalesHandlerState {
            sales_service: services.sales.clone(),
        });

    let product_routes = Router::new()
        .route("/", get(products::list_products).post(products::create_product))
        .route("/{id}", get(products::get_product))
        .route("/{id}/stock", put(products::update_stock))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(products::ProductHandlerState {
            product_service: services.products.clone(),
        });

    let suggestion_routes = Router::new()
        .route("/", get(suggestions::list_suggestions))
        .route("/inventory", get(suggestions::inventory_suggestions))
        .route("/pricing", get(suggestions::pricing_suggestions))
        .route("/marketing", get(suggestions::marketing_suggestions))
        .route("/regional", get(suggestions::regional_suggestions))
        .route("/bundles", get(suggestions::bundle_suggestions))
        .route("/high-priority", get(suggestions::high_priority_suggestions))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(suggestions::SuggestionHandlerState {
            suggestion_service: services.suggestions.clone(),
        });

    let card_routes = Router::new()
        .route("/", get(cards::list_cards).post(cards::create_card))
        .route("/user/{user_id}", get(cards::user_cards))
        .route(
            "/{id}",
            get(cards::get_card)
                .put(cards::update_card)
                .delete(cards::delete_card),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(cards::CardHandlerState {
            card_service: services.cards.clone(),
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut app = Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .merge(health_routes)
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Billing
        .nest("/api/v1/users", user_routes)
        .nest("/api/v1/plans", plan_routes)
        .nest("/api/v1/subscriptions", subscription_routes)
        .nest("/api/v1/bills", bill_routes)
        .nest("/api/v1/payments", payment_routes)
        .nest("/api/v1/transactions", transaction_routes)
        .nest("/api/v1/cards", card_routes)
        // Sales
        .nest("/api/v1/sales", sales_routes)
        .nest("/api/v1/products", product_routes)
        .nest("/api/v1/suggestions", suggestion_routes);

    if let Some(handle) = metrics {
        app = app.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(metrics::MetricsState { handle }),
        );
    }

    app.layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::billing::testing::FixedGateway;
    use crate::domain::User;
    use crate::infrastructure::InMemoryRepositoryProvider;
    use crate::interfaces::http::modules::request_id::REQUEST_ID_HEADER;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::Service;

    const ADMIN_EMAIL: &str = "admin@nexuspay.local";
    const ADMIN_PASSWORD: &str = "admin-pass";

    struct TestApp {
        router: Router,
        gateway: Arc<FixedGateway>,
    }

    async fn app() -> TestApp {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let hash = bcrypt::hash(ADMIN_PASSWORD, 4).unwrap();
        repos
            .users()
            .save(User::new_admin(ADMIN_EMAIL, "Admin", hash))
            .await
            .unwrap();

        let gateway = FixedGateway::new(true);
        let jwt = JwtConfig::new("router-test-secret", 1);
        let services = ApiServices::new(
            repos,
            gateway.clone(),
            BillingPolicy::default(),
            jwt.clone(),
        );
        let router = create_api_router(services, jwt, health::HealthState::new(None), None);
        TestApp { router, gateway }
    }

    async fn send(router: &Router, req: Request<Body>) -> Response {
        let mut svc = router.clone().into_service();
        svc.call(req).await.unwrap()
    }

    async fn json_body(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn login(router: &Router) -> String {
        let resp = send(
            router,
            request(
                "POST",
                "/api/v1/auth/login",
                None,
                Some(json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        body["data"]["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_public_and_ok_without_database() {
        let app = app().await;
        let resp = send(&app.router, request("GET", "/health", None, None)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
        let body = json_body(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["status"], "skipped");
    }

    #[tokio::test]
    async fn api_requires_bearer_token() {
        let app = app().await;
        let resp = send(&app.router, request("GET", "/api/v1/plans", None, None)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(resp).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn wrong_password_is_401() {
        let app = app().await;
        let resp = send(
            &app.router,
            request(
                "POST",
                "/api/v1/auth/login",
                None,
                Some(json!({"email": ADMIN_EMAIL, "password": "nope"})),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_then_me() {
        let app = app().await;
        let token = login(&app.router).await;

        let resp = send(&app.router, request("GET", "/api/v1/auth/me", Some(&token), None)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["data"]["email"], ADMIN_EMAIL);
        assert_eq!(body["data"]["role"], "ADMIN");
    }

    #[tokio::test]
    async fn missing_bill_is_404_envelope() {
        let app = app().await;
        let token = login(&app.router).await;

        let resp = send(&app.router, request("GET", "/api/v1/bills/999", Some(&token), None)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = json_body(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("Bill"));
    }

    #[tokio::test]
    async fn unknown_transaction_status_is_400() {
        let app = app().await;
        let token = login(&app.router).await;
        let resp = send(
            &app.router,
            request("GET", "/api/v1/transactions/status/lost", Some(&token), None),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn subscribe_and_pay() {
        let app = app().await;
        let token = login(&app.router).await;

        let resp = send(
            &app.router,
            request(
                "POST",
                "/api/v1/users",
                Some(&token),
                Some(json!({"email": "alice@example.com", "name": "Alice"})),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let user_id = json_body(resp).await["data"]["id"].as_i64().unwrap();

        let resp = send(
            &app.router,
            request(
                "POST",
                "/api/v1/plans",
                Some(&token),
                Some(json!({
                    "name": "Starter",
                    "monthly_price": "10.00",
                    "yearly_price": "100.00",
                    "plan_type": "basic"
                })),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let plan_id = json_body(resp).await["data"]["id"].as_i64().unwrap();

        let resp = send(
            &app.router,
            request(
                "POST",
                "/api/v1/subscriptions",
                Some(&token),
                Some(json!({"user_id": user_id, "plan_id": plan_id, "billing_cycle": "MONTHLY"})),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = json_body(resp).await;
        assert_eq!(body["data"]["subscription"]["status"], "ACTIVE");
        assert_eq!(body["data"]["bill"]["amount"], "10.00");
        let bill_id = body["data"]["bill"]["id"].as_i64().unwrap();

        app.gateway.set(false);
        let resp = send(
            &app.router,
            request(
                "POST",
                "/api/v1/payments/initiate",
                Some(&token),
                Some(json!({"bill_id": bill_id, "payment_method": "CREDIT_CARD"})),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["data"]["success"], false);
        assert_eq!(body["data"]["transaction"]["status"], "FAILED");
        let failed_tx = body["data"]["transaction"]["transaction_id"]
            .as_str()
            .unwrap()
            .to_string();

        app.gateway.set(true);
        let resp = send(
            &app.router,
            request(
                "POST",
                &format!("/api/v1/payments/retry/{}", failed_tx),
                Some(&token),
                None,
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["data"]["success"], true);
        assert_eq!(body["data"]["message"], "Payment retry successful");
        assert_eq!(body["data"]["transaction"]["retry_count"], 1);

        let resp = send(
            &app.router,
            request(
                "POST",
                &format!("/api/v1/payments/retry/{}", failed_tx),
                Some(&token),
                None,
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = send(
            &app.router,
            request("GET", &format!("/api/v1/bills/{}", bill_id), Some(&token), None),
        )
        .await;
        assert_eq!(json_body(resp).await["data"]["status"], "PAID");

        let resp = send(
            &app.router,
            request(
                "GET",
                &format!("/api/v1/transactions/bill/{}", bill_id),
                Some(&token),
                None,
            ),
        )
        .await;
        assert_eq!(json_body(resp).await["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn invoice_from_recorded_sales() {
        let app = app().await;
        let token = login(&app.router).await;

        for (name, qty, price, premium, customer) in [
            ("Laptop", 1, "1000.00", false, "Bob Stone"),
            ("Mouse", 2, "25.00", true, "Carol King"),
            ("Laptop", 1, "1000.00", true, "Carol King"),
        ] {
            let resp = send(
                &app.router,
                request(
                    "POST",
                    "/api/v1/sales",
                    Some(&token),
                    Some(json!({
                        "product_id": if name == "Laptop" { 1 } else { 2 },
                        "product_name": name,
                        "category": "Electronics",
                        "quantity": qty,
                        "unit_price": price,
                        "customer_id": if customer == "Bob Stone" { 10 } else { 11 },
                        "customer_name": customer,
                        "is_premium_customer": premium,
                        "payment_method": "CREDIT_CARD",
                        "sale_date": "2026-01-15T10:00:00Z",
                        "region": "North"
                    })),
                ),
            )
            .await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let resp = send(
            &app.router,
            request(
                "POST",
                "/api/v1/bills/generate-from-sales",
                Some(&token),
                Some(json!({
                    "period": "custom",
                    "start_date": "2026-01-01",
                    "end_date": "2026-01-31"
                })),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let invoice = json_body(resp).await["data"].clone();

        // Laptop: 2000 - 200 premium discount; Mouse: 50 - 10.
        assert_eq!(invoice["line_items"].as_array().unwrap().len(), 2);
        assert_eq!(invoice["line_items"][0]["product_name"], "Laptop");
        assert_eq!(invoice["subtotal"], "2050.00");
        assert_eq!(invoice["total_discount"], "210.00");
        assert_eq!(invoice["taxable_amount"], "1840.00");
        assert_eq!(invoice["tax_amount"], "184.00");
        assert_eq!(invoice["grand_total"], "2024.00");
        assert_eq!(invoice["total_transactions"], 3);
        assert_eq!(invoice["payment_method"], "CREDIT_CARD");
        assert!(invoice["bill_number"].as_str().unwrap().starts_with("SB-"));
    }

    #[tokio::test]
    async fn oversized_sale_is_400() {
        let app = app().await;
        let token = login(&app.router).await;
        let resp = send(
            &app.router,
            request(
                "POST",
                "/api/v1/sales",
                Some(&token),
                Some(json!({
                    "product_id": 1,
                    "product_name": "Laptop",
                    "category": "Electronics",
                    "quantity": 2,
                    "unit_price": "79228162514264337593543950335",
                    "customer_id": 10,
                    "customer_name": "Bob Stone",
                    "is_premium_customer": true,
                    "payment_method": "CREDIT_CARD",
                    "region": "North"
                })),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json_body(resp).await;
        assert_eq!(body["error"], "Validation: Sale total out of range");
    }

    #[tokio::test]
    async fn custom_invoice_without_dates_is_400() {
        let app = app().await;
        let token = login(&app.router).await;
        let resp = send(
            &app.router,
            request(
                "POST",
                "/api/v1/bills/generate-from-sales",
                Some(&token),
                Some(json!({"period": "CUSTOM"})),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn openapi_document_lists_billing_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/bills/generate-from-sales"));
        assert!(doc.paths.paths.contains_key("/api/v1/payments/retry/{transaction_id}"));
    }
}

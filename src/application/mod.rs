//! Application layer: use-cases orchestrating the domain over repositories

pub mod billing;
pub mod identity;
pub mod sales;

pub use billing::{
    BillService, BillingPolicy, CardService, PaymentGateway, PaymentService, PlanService,
    SimulatedGateway, SubscriptionService,
};
pub use identity::UserService;
pub use sales::{ProductService, SalesService, SuggestionService};

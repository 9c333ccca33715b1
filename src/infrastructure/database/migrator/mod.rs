//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_subscription_plans;
mod m20240101_000003_create_user_subscriptions;
mod m20240101_000004_create_bills;
mod m20240101_000005_create_payment_transactions;
mod m20240101_000006_create_products;
mod m20240101_000007_create_sales;
mod m20240101_000008_create_card_details;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_subscription_plans::Migration),
            Box::new(m20240101_000003_create_user_subscriptions::Migration),
            Box::new(m20240101_000004_create_bills::Migration),
            Box::new(m20240101_000005_create_payment_transactions::Migration),
            Box::new(m20240101_000006_create_products::Migration),
            Box::new(m20240101_000007_create_sales::Migration),
            Box::new(m20240101_000008_create_card_details::Migration),
        ]
    }
}

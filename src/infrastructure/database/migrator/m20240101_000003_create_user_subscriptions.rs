//! Create user_subscriptions table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_subscription_plans::SubscriptionPlans;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserSubscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserSubscriptions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserSubscriptions::UserId).integer().not_null())
                    .col(ColumnDef::new(UserSubscriptions::PlanId).integer().not_null())
                    .col(
                        ColumnDef::new(UserSubscriptions::BillingCycle)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserSubscriptions::Status)
                            .string_len(20)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(UserSubscriptions::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserSubscriptions::EndDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(UserSubscriptions::NextBillingDate)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(UserSubscriptions::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserSubscriptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserSubscriptions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_subscriptions_user")
                            .from(UserSubscriptions::Table, UserSubscriptions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_subscriptions_plan")
                            .from(UserSubscriptions::Table, UserSubscriptions::PlanId)
                            .to(SubscriptionPlans::Table, SubscriptionPlans::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Scheduler scans ACTIVE rows by next billing date
        manager
            .create_index(
                Index::create()
                    .name("idx_user_subscriptions_status_next_billing")
                    .table(UserSubscriptions::Table)
                    .col(UserSubscriptions::Status)
                    .col(UserSubscriptions::NextBillingDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_subscriptions_user")
                    .table(UserSubscriptions::Table)
                    .col(UserSubscriptions::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSubscriptions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum UserSubscriptions {
    Table,
    Id,
    UserId,
    PlanId,
    BillingCycle,
    Status,
    StartDate,
    EndDate,
    NextBillingDate,
    Amount,
    CreatedAt,
    UpdatedAt,
}

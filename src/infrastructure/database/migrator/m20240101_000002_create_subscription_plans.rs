//! Create subscription_plans table and seed the standard plans

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// name, description, monthly, yearly, features, type, max users, priority support, branding
const STANDARD_PLANS: [(&str, &str, &str, &str, &str, &str, i32, bool, bool); 3] = [
    (
        "Basic",
        "Essential billing for small teams",
        "9.99",
        "99.99",
        "Up to 5 users, 100 bills per month, Email support",
        "BASIC",
        5,
        false,
        false,
    ),
    (
        "Professional",
        "Advanced analytics and priority support for growing businesses",
        "29.99",
        "299.99",
        "Up to 20 users, Unlimited bills, Priority support, API access",
        "PREMIUM",
        20,
        true,
        false,
    ),
    (
        "Enterprise",
        "Full-featured solution with custom branding",
        "99.99",
        "999.99",
        "Unlimited users, Unlimited bills, 24/7 support, Custom branding, SLA",
        "ENTERPRISE",
        -1,
        true,
        true,
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubscriptionPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubscriptionPlans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SubscriptionPlans::Description).string_len(500))
                    .col(
                        ColumnDef::new(SubscriptionPlans::MonthlyPrice)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::YearlyPrice)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SubscriptionPlans::Features).text())
                    .col(
                        ColumnDef::new(SubscriptionPlans::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::PlanType)
                            .string_len(20)
                            .not_null()
                            .default("BASIC"),
                    )
                    .col(ColumnDef::new(SubscriptionPlans::DiscountPercentage).decimal_len(5, 2))
                    .col(
                        ColumnDef::new(SubscriptionPlans::OfferValidUntil)
                            .timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(SubscriptionPlans::MaxUsers).integer())
                    .col(ColumnDef::new(SubscriptionPlans::MaxBillsPerMonth).integer())
                    .col(
                        ColumnDef::new(SubscriptionPlans::PrioritySupport)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::CustomBranding)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        let now = chrono::Utc::now().to_rfc3339();
        let mut insert = Query::insert()
            .into_table(SubscriptionPlans::Table)
            .columns([
                SubscriptionPlans::Name,
                SubscriptionPlans::Description,
                SubscriptionPlans::MonthlyPrice,
                SubscriptionPlans::YearlyPrice,
                SubscriptionPlans::Features,
                SubscriptionPlans::Active,
                SubscriptionPlans::IsDefault,
                SubscriptionPlans::PlanType,
                SubscriptionPlans::MaxUsers,
                SubscriptionPlans::PrioritySupport,
                SubscriptionPlans::CustomBranding,
                SubscriptionPlans::CreatedAt,
                SubscriptionPlans::UpdatedAt,
            ])
            .to_owned();

        for (
            name,
            description,
            monthly,
            yearly,
            features,
            plan_type,
            max_users,
            priority,
            branding,
        ) in STANDARD_PLANS
        {
            insert.values_panic([
                name.into(),
                description.into(),
                monthly.into(),
                yearly.into(),
                features.into(),
                true.into(),
                true.into(),
                plan_type.into(),
                max_users.into(),
                priority.into(),
                branding.into(),
                now.clone().into(),
                now.clone().into(),
            ]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubscriptionPlans::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum SubscriptionPlans {
    Table,
    Id,
    Name,
    Description,
    MonthlyPrice,
    YearlyPrice,
    Features,
    Active,
    IsDefault,
    PlanType,
    DiscountPercentage,
    OfferValidUntil,
    MaxUsers,
    MaxBillsPerMonth,
    PrioritySupport,
    CustomBranding,
    CreatedAt,
    UpdatedAt,
}

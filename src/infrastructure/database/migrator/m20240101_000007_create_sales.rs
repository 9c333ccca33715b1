//! Create sales table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sales::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sales::ProductId).integer().not_null())
                    .col(ColumnDef::new(Sales::ProductName).string_len(255).not_null())
                    .col(ColumnDef::new(Sales::Category).string_len(100).not_null())
                    .col(ColumnDef::new(Sales::Quantity).integer().not_null())
                    .col(ColumnDef::new(Sales::UnitPrice).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Sales::TotalPrice).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Sales::CustomerId).integer().not_null())
                    .col(ColumnDef::new(Sales::CustomerName).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Sales::IsPremiumCustomer)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Sales::DiscountApplied)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Sales::FinalAmount).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Sales::PaymentMethod).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Sales::SaleDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sales::Region).string_len(100).not_null())
                    .col(ColumnDef::new(Sales::Salesperson).string_len(255))
                    .col(ColumnDef::new(Sales::Notes).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sales_sale_date")
                    .table(Sales::Table)
                    .col(Sales::SaleDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sales_region")
                    .table(Sales::Table)
                    .col(Sales::Region)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Sales {
    Table,
    Id,
    ProductId,
    ProductName,
    Category,
    Quantity,
    UnitPrice,
    TotalPrice,
    CustomerId,
    CustomerName,
    IsPremiumCustomer,
    DiscountApplied,
    FinalAmount,
    PaymentMethod,
    SaleDate,
    Region,
    Salesperson,
    Notes,
}

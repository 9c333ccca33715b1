//! Create payment_transactions table

use sea_orm_migration::prelude::*;

use super::m20240101_000004_create_bills::Bills;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentTransactions::TransactionId)
                            .string_len(50)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaymentTransactions::UserId).integer().not_null())
                    .col(ColumnDef::new(PaymentTransactions::BillId).integer().not_null())
                    .col(
                        ColumnDef::new(PaymentTransactions::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentTransactions::Status)
                            .string_len(20)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(PaymentTransactions::PaymentMethod)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentTransactions::TransactionDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentTransactions::ScheduledRetryDate)
                            .timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(PaymentTransactions::FailureReason).string_len(500))
                    .col(
                        ColumnDef::new(PaymentTransactions::RetryCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PaymentTransactions::Metadata)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentTransactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentTransactions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_transactions_bill")
                            .from(PaymentTransactions::Table, PaymentTransactions::BillId)
                            .to(Bills::Table, Bills::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Retry scan: FAILED rows by scheduled retry date
        manager
            .create_index(
                Index::create()
                    .name("idx_payment_transactions_status_retry")
                    .table(PaymentTransactions::Table)
                    .col(PaymentTransactions::Status)
                    .col(PaymentTransactions::ScheduledRetryDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_transactions_bill")
                    .table(PaymentTransactions::Table)
                    .col(PaymentTransactions::BillId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentTransactions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PaymentTransactions {
    Table,
    TransactionId,
    UserId,
    BillId,
    Amount,
    Status,
    PaymentMethod,
    TransactionDate,
    ScheduledRetryDate,
    FailureReason,
    RetryCount,
    Metadata,
    CreatedAt,
    UpdatedAt,
}

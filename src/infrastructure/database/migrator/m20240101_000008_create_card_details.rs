//! Create card_details table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CardDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CardDetails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CardDetails::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(CardDetails::CardNumberLast4)
                            .string_len(4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CardDetails::CardHolderName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CardDetails::CardType).string_len(50))
                    .col(ColumnDef::new(CardDetails::ExpiryMonth).integer().not_null())
                    .col(ColumnDef::new(CardDetails::ExpiryYear).integer().not_null())
                    .col(
                        ColumnDef::new(CardDetails::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CardDetails::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CardDetails::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_card_details_user")
                            .from(CardDetails::Table, CardDetails::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_card_details_user")
                    .table(CardDetails::Table)
                    .col(CardDetails::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CardDetails::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum CardDetails {
    Table,
    Id,
    UserId,
    CardNumberLast4,
    CardHolderName,
    CardType,
    ExpiryMonth,
    ExpiryYear,
    IsDefault,
    CreatedAt,
    UpdatedAt,
}

//! Migration: issues table.

use sea_orm_migration::prelude::*;

use domain::{MAX_DESCRIPTION_LENGTH, MAX_RESPONSIBLE_LENGTH, MAX_STATUS_LENGTH, MAX_TITLE_LENGTH};

use super::m20240101_000001_create_identity_tables::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Issues::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Issues::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Issues::Title)
                            .string_len(MAX_TITLE_LENGTH as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Issues::Description)
                            .string_len(MAX_DESCRIPTION_LENGTH as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Issues::Status)
                            .string_len(MAX_STATUS_LENGTH as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Issues::Responsible)
                            .string_len(MAX_RESPONSIBLE_LENGTH as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Issues::Severity)
                            .string_len(10)
                            .not_null()
                            .default("LOW"),
                    )
                    .col(ColumnDef::new(Issues::OwnerId).uuid().not_null())
                    .col(
                        ColumnDef::new(Issues::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Issues::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issues_owner")
                            .from(Issues::Table, Issues::OwnerId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_issues_owner_id")
                    .table(Issues::Table)
                    .col(Issues::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Issues::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Issues {
    Table,
    Id,
    Title,
    Description,
    Status,
    Responsible,
    Severity,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}

//! Create `account` table.
//!
//! Stores login identities; passwords are kept as salted one-way hashes,
//! never plaintext.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Account::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Account::Username, 64).unique_key().not_null())
                    .col(string_len(Account::PasswordHash, 255).not_null())
                    .col(string_len(Account::PasswordAlgorithm, 32).not_null())
                    .col(timestamp_with_time_zone(Account::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Account::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Account::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Account { Table, Id, Username, PasswordHash, PasswordAlgorithm, CreatedAt, UpdatedAt }

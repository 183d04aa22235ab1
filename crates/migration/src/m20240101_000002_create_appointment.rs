//! Create `appointment` table with FK to `account`.
//!
//! `notes` is capped at 4000 chars; `from_time` stays free text on purpose.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointment::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(Appointment::UserId).not_null())
                    .col(string_len(Appointment::Name, 255).not_null())
                    .col(string_len(Appointment::Description, 1024).not_null())
                    .col(date(Appointment::FromDate).not_null())
                    // Explicitly define nullable columns to avoid conflicting NULL/NOT NULL
                    .col(ColumnDef::new(Appointment::FromTime).string_len(32).null())
                    .col(string_len(Appointment::Genre, 64).not_null())
                    .col(ColumnDef::new(Appointment::Notes).string_len(4000).null())
                    .col(timestamp_with_time_zone(Appointment::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Appointment::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_account")
                            .from(Appointment::Table, Appointment::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Appointment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Appointment { Table, Id, UserId, Name, Description, FromDate, FromTime, Genre, Notes, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Account { Table, Id }

//! Secondary indexes for the lookups the services actually issue:
//! by owner, and by owner + date.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_appointment_user_id")
                    .table(Appointment::Table)
                    .col(Appointment::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_appointment_user_id_from_date")
                    .table(Appointment::Table)
                    .col(Appointment::UserId)
                    .col(Appointment::FromDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_appointment_user_id_from_date").table(Appointment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_appointment_user_id").table(Appointment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Appointment { Table, UserId, FromDate }

use anyhow::Result;
use chrono::NaiveDate;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::db::connect;
use crate::{account, appointment};

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn unique_username(prefix: &str) -> String {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    format!("{prefix}_{nanos}")
}

#[tokio::test]
async fn test_account_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let username = unique_username("model_acct");
    let created = account::create(&db, &username, "$argon2id$stub$hash", "argon2").await?;
    assert_eq!(created.username, username);
    assert!(created.id > 0);

    let found = account::find_by_username(&db, &username).await?;
    assert_eq!(found.as_ref().map(|a| a.id), Some(created.id));

    assert!(account::exists_by_id(&db, created.id).await?);
    assert!(account::count(&db).await? >= 1);

    account::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(!account::exists_by_id(&db, created.id).await?);
    Ok(())
}

#[tokio::test]
async fn test_appointment_crud_and_lookups() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let owner = account::create(&db, &unique_username("model_appt"), "$argon2id$stub$hash", "argon2").await?;
    let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let other_day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();

    let a = appointment::create(&db, owner.id, "Checkup", "Annual", day, Some("14:00"), "Medical", None).await?;
    let b = appointment::create(&db, owner.id, "Dentist", "Cleaning", other_day, Some("09:00"), "Medical", None).await?;
    let c = appointment::create(&db, owner.id, "Early", "Same day", day, Some("08:00"), "Medical", None).await?;

    let all = appointment::find_by_user_id(&db, owner.id).await?;
    assert_eq!(all.len(), 3);

    let on_day = appointment::find_by_user_id_and_from_date(&db, owner.id, day).await?;
    assert_eq!(on_day.len(), 2);

    let ordered = appointment::find_by_user_id_ordered(&db, owner.id).await?;
    let ids: Vec<i64> = ordered.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![c.id, a.id, b.id]);

    let updated = appointment::set_notes(&db, a.id, Some("bring referral")).await?.unwrap();
    assert_eq!(updated.notes.as_deref(), Some("bring referral"));

    assert_eq!(appointment::delete_by_id(&db, b.id).await?, 1);
    assert_eq!(appointment::delete_by_id(&db, b.id).await?, 0);

    let removed = appointment::delete_by_user_id_and_from_date(&db, owner.id, day).await?;
    assert_eq!(removed, 2);

    // cascade cleans up anything left behind
    account::Entity::delete_by_id(owner.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_set_notes_rejects_overlong_text() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let owner = account::create(&db, &unique_username("model_notes"), "$argon2id$stub$hash", "argon2").await?;
    let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let appt = appointment::create(&db, owner.id, "Long notes", "Bound check", day, None, "Misc", None).await?;

    let too_long = "x".repeat(appointment::NOTES_MAX_LEN + 1);
    assert!(appointment::set_notes(&db, appt.id, Some(&too_long)).await.is_err());

    account::Entity::delete_by_id(owner.id).exec(&db).await?;
    Ok(())
}

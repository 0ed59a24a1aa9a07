use shared::models::Restaurant;
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM restaurant WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Publicly listable restaurants only.
pub async fn find_all_active(pool: &SqlitePool) -> Result<Vec<Restaurant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM restaurant WHERE is_active = 1 ORDER BY name ASC")
        .fetch_all(pool)
        .await
}

pub async fn insert(pool: &SqlitePool, r: &Restaurant) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO restaurant (id, name, admin_id, address, email, phone, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&r.id)
    .bind(&r.name)
    .bind(&r.admin_id)
    .bind(&r.address)
    .bind(&r.email)
    .bind(&r.phone)
    .bind(r.is_active)
    .bind(r.created_at)
    .bind(r.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

use shared::models::User;
use sqlx::SqlitePool;

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM app_user WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &SqlitePool, u: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO app_user (id, first_name, last_name, email, phone, password_hash, role, \
             must_change_password, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&u.id)
    .bind(&u.first_name)
    .bind(&u.last_name)
    .bind(&u.email)
    .bind(&u.phone)
    .bind(&u.password_hash)
    .bind(u.role)
    .bind(u.must_change_password)
    .bind(u.is_active)
    .bind(u.created_at)
    .bind(u.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Used by onboarding to roll back the admin account when the
/// restaurant insert fails after the user was already written.
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM app_user WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

use chrono::NaiveDate;
use shared::models::Reservation;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, restaurant_id, date, time, number_of_people, \
     customer_name, customer_last_name, customer_email, customer_phone, \
     notes, status, rejection_reason, cancellation_token, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Reservation>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {COLUMNS} FROM reservation WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_token(
    pool: &SqlitePool,
    token: &str,
) -> Result<Option<Reservation>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE cancellation_token = ?"
    ))
    .bind(token)
    .fetch_optional(pool)
    .await
}

/// All reservations for a restaurant on a calendar date, earliest first.
pub async fn find_by_restaurant_and_date(
    pool: &SqlitePool,
    restaurant_id: &str,
    date: NaiveDate,
) -> Result<Vec<Reservation>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM reservation \
         WHERE restaurant_id = ? AND date = ? \
         ORDER BY time ASC, created_at ASC"
    ))
    .bind(restaurant_id)
    .bind(date)
    .fetch_all(pool)
    .await
}

/// Insert-or-update by primary key.
pub async fn save(pool: &SqlitePool, r: &Reservation) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO reservation (id, restaurant_id, date, time, number_of_people, \
             customer_name, customer_last_name, customer_email, customer_phone, \
             notes, status, rejection_reason, cancellation_token, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET \
             status = excluded.status, \
             rejection_reason = excluded.rejection_reason, \
             updated_at = excluded.updated_at",
    )
    .bind(&r.id)
    .bind(&r.restaurant_id)
    .bind(r.date)
    .bind(r.time)
    .bind(r.number_of_people as i64)
    .bind(&r.customer_name)
    .bind(&r.customer_last_name)
    .bind(&r.customer_email)
    .bind(&r.customer_phone)
    .bind(&r.notes)
    .bind(r.status)
    .bind(&r.rejection_reason)
    .bind(&r.cancellation_token)
    .bind(r.created_at)
    .bind(r.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

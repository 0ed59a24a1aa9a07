use shared::models::{AcceptanceMode, OpeningHours, Settings, TimeSlotInterval};
use sqlx::SqlitePool;

/// Raw row shape; `opening_hours` is a JSON document and the two enum
/// columns are stored as plain INTEGER/TEXT.
#[derive(sqlx::FromRow)]
struct SettingsRow {
    id: String,
    restaurant_id: String,
    opening_hours: String,
    time_slot_interval: i64,
    deposit_amount: f64,
    acceptance_mode: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<SettingsRow> for Settings {
    type Error = sqlx::Error;

    fn try_from(row: SettingsRow) -> Result<Self, Self::Error> {
        let decode = |column: &str, message: String| sqlx::Error::ColumnDecode {
            index: column.into(),
            source: message.into(),
        };

        let opening_hours: OpeningHours = serde_json::from_str(&row.opening_hours)
            .map_err(|e| decode("opening_hours", e.to_string()))?;
        let time_slot_interval = u16::try_from(row.time_slot_interval)
            .map_err(|e| decode("time_slot_interval", e.to_string()))
            .and_then(|v| {
                TimeSlotInterval::try_from(v).map_err(|e| decode("time_slot_interval", e))
            })?;
        let acceptance_mode: AcceptanceMode = row
            .acceptance_mode
            .parse()
            .map_err(|e| decode("acceptance_mode", e))?;

        Ok(Settings {
            id: row.id,
            restaurant_id: row.restaurant_id,
            opening_hours,
            time_slot_interval,
            deposit_amount: row.deposit_amount,
            acceptance_mode,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub async fn find_by_restaurant(
    pool: &SqlitePool,
    restaurant_id: &str,
) -> Result<Option<Settings>, sqlx::Error> {
    let row: Option<SettingsRow> = sqlx::query_as("SELECT * FROM settings WHERE restaurant_id = ?")
        .bind(restaurant_id)
        .fetch_optional(pool)
        .await?;
    row.map(Settings::try_from).transpose()
}

/// Insert-or-update keyed on the one-per-restaurant unique column.
pub async fn upsert(pool: &SqlitePool, s: &Settings) -> Result<(), sqlx::Error> {
    let opening_hours = serde_json::to_string(&s.opening_hours).map_err(|e| {
        sqlx::Error::Encode(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        )))
    })?;

    sqlx::query(
        "INSERT INTO settings (id, restaurant_id, opening_hours, time_slot_interval, \
             deposit_amount, acceptance_mode, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
         ON CONFLICT(restaurant_id) DO UPDATE SET \
             opening_hours = excluded.opening_hours, \
             time_slot_interval = excluded.time_slot_interval, \
             deposit_amount = excluded.deposit_amount, \
             acceptance_mode = excluded.acceptance_mode, \
             updated_at = excluded.updated_at",
    )
    .bind(&s.id)
    .bind(&s.restaurant_id)
    .bind(opening_hours)
    .bind(s.time_slot_interval.minutes() as i64)
    .bind(s.deposit_amount)
    .bind(s.acceptance_mode.as_str())
    .bind(s.created_at)
    .bind(s.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

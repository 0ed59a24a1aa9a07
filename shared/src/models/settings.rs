//! Restaurant Settings Model
//!
//! Per-restaurant booking configuration: weekly opening shifts, the
//! bookable time-slot granularity and the acceptance policy. Settings are
//! created lazily on the first configuration write and mutated in place
//! afterwards (no versioning).

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::serde_helpers;
use crate::error::{AppError, AppResult};

/// A contiguous opening interval on a given day-of-week with a party capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    #[serde(with = "serde_helpers::hhmm")]
    pub open: NaiveTime,
    #[serde(with = "serde_helpers::hhmm")]
    pub close: NaiveTime,
    pub capacity: u32,
}

impl Shift {
    /// Validate the shift invariants: `open < close`, `capacity > 0`.
    pub fn validate(&self) -> AppResult<()> {
        if self.open >= self.close {
            return Err(AppError::validation(format!(
                "Shift must open before it closes ({} >= {})",
                self.open.format("%H:%M"),
                self.close.format("%H:%M"),
            )));
        }
        if self.capacity == 0 {
            return Err(AppError::validation("Shift capacity must be at least 1"));
        }
        Ok(())
    }
}

/// Weekly opening schedule: an ordered list of non-overlapping shifts per
/// day. Absent or empty days mean the restaurant is closed that day.
/// Overlap is assumed pre-checked by configuration, not re-validated here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub monday: Vec<Shift>,
    #[serde(default)]
    pub tuesday: Vec<Shift>,
    #[serde(default)]
    pub wednesday: Vec<Shift>,
    #[serde(default)]
    pub thursday: Vec<Shift>,
    #[serde(default)]
    pub friday: Vec<Shift>,
    #[serde(default)]
    pub saturday: Vec<Shift>,
    #[serde(default)]
    pub sunday: Vec<Shift>,
}

impl OpeningHours {
    /// Shifts for a given day-of-week
    pub fn day(&self, weekday: Weekday) -> &[Shift] {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    /// Validate every configured shift
    pub fn validate(&self) -> AppResult<()> {
        for shift in [
            &self.monday,
            &self.tuesday,
            &self.wednesday,
            &self.thursday,
            &self.friday,
            &self.saturday,
            &self.sunday,
        ]
        .into_iter()
        .flatten()
        {
            shift.validate()?;
        }
        Ok(())
    }
}

/// Lowercase english day name, used in customer-facing rejection messages.
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Bookable time-slot granularity in minutes.
///
/// Only the enumerated granularities are accepted; the wire format is the
/// bare minute number (e.g. `30`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum TimeSlotInterval {
    Min15,
    Min30,
    Min45,
    Min60,
    Min90,
    Min120,
}

impl TimeSlotInterval {
    pub fn minutes(self) -> u32 {
        match self {
            Self::Min15 => 15,
            Self::Min30 => 30,
            Self::Min45 => 45,
            Self::Min60 => 60,
            Self::Min90 => 90,
            Self::Min120 => 120,
        }
    }
}

impl TryFrom<u16> for TimeSlotInterval {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            15 => Ok(Self::Min15),
            30 => Ok(Self::Min30),
            45 => Ok(Self::Min45),
            60 => Ok(Self::Min60),
            90 => Ok(Self::Min90),
            120 => Ok(Self::Min120),
            other => Err(format!(
                "Invalid time slot interval: {other} (allowed: 15, 30, 45, 60, 90, 120)"
            )),
        }
    }
}

impl From<TimeSlotInterval> for u16 {
    fn from(value: TimeSlotInterval) -> u16 {
        value.minutes() as u16
    }
}

/// Per-restaurant acceptance policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AcceptanceMode {
    /// New reservations are confirmed immediately
    Auto,
    /// New reservations wait for an explicit admin accept/reject
    Manual,
}

impl AcceptanceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Manual => "MANUAL",
        }
    }
}

impl std::str::FromStr for AcceptanceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AUTO" => Ok(Self::Auto),
            "MANUAL" => Ok(Self::Manual),
            other => Err(format!("Invalid acceptance mode: {other}")),
        }
    }
}

/// Settings entity — one per restaurant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub id: String,
    pub restaurant_id: String,
    pub opening_hours: OpeningHours,
    pub time_slot_interval: TimeSlotInterval,
    pub deposit_amount: f64,
    pub acceptance_mode: AcceptanceMode,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Settings patch payload
///
/// Explicit "fields present" structure: present fields overwrite, absent
/// fields keep their current values. On the first configuration write all
/// fields must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot_interval: Option<TimeSlotInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptance_mode: Option<AcceptanceMode>,
}

impl SettingsUpdate {
    /// Validate whatever fields are present
    pub fn validate(&self) -> AppResult<()> {
        if let Some(hours) = &self.opening_hours {
            hours.validate()?;
        }
        if let Some(amount) = self.deposit_amount
            && amount < 0.0
        {
            return Err(AppError::validation(format!(
                "Deposit amount cannot be negative: {amount}"
            )));
        }
        Ok(())
    }
}

impl Settings {
    /// First-time creation: every field of the patch must be present.
    pub fn create_from(restaurant_id: &str, update: SettingsUpdate) -> AppResult<Self> {
        let (Some(opening_hours), Some(time_slot_interval), Some(deposit_amount), Some(acceptance_mode)) = (
            update.opening_hours,
            update.time_slot_interval,
            update.deposit_amount,
            update.acceptance_mode,
        ) else {
            return Err(AppError::validation(
                "All fields are required when creating settings for the first time",
            ));
        };

        let now = crate::util::now_millis();
        Ok(Self {
            id: crate::util::new_id(),
            restaurant_id: restaurant_id.to_string(),
            opening_hours,
            time_slot_interval,
            deposit_amount,
            acceptance_mode,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge a patch into existing settings: present fields overwrite.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(hours) = update.opening_hours {
            self.opening_hours = hours;
        }
        if let Some(interval) = update.time_slot_interval {
            self.time_slot_interval = interval;
        }
        if let Some(amount) = update.deposit_amount {
            self.deposit_amount = amount;
        }
        if let Some(mode) = update.acceptance_mode {
            self.acceptance_mode = mode;
        }
        self.updated_at = crate::util::now_millis();
    }
}

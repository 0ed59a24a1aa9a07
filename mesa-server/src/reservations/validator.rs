//! Admission checks for incoming booking requests.
//!
//! The checks run in a fixed order and the first failure wins: group
//! size, minimum advance time, opening hours, slot alignment, capacity.
//! Each failure carries the customer-facing message verbatim.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use shared::models::settings::day_name;
use shared::models::{Reservation, Shift, TimeSlotInterval};
use shared::{AppError, AppResult};

/// Largest bookable party. Bigger groups go through the restaurant directly.
pub const MAX_GROUP_SIZE: u32 = 9;

/// Minimum lead time between "now" and the requested slot.
pub const MIN_ADVANCE_MINUTES: i64 = 30;

/// A table is assumed occupied for this long, so the last bookable slot
/// of a shift is this many minutes before close.
pub const SERVICE_WINDOW_MINUTES: i64 = 60;

pub fn validate_group_size(number_of_people: u32) -> AppResult<()> {
    if number_of_people == 0 {
        return Err(AppError::validation("Number of people must be at least 1"));
    }
    if number_of_people > MAX_GROUP_SIZE {
        return Err(AppError::validation(
            "For groups of 10 or more please contact the restaurant directly",
        ));
    }
    Ok(())
}

/// The requested slot must be at least 30 minutes ahead of `now`
/// (restaurant-local wall clock). Exactly 30 minutes is accepted.
pub fn validate_minimum_advance_time(
    date: NaiveDate,
    time: NaiveTime,
    now: NaiveDateTime,
) -> AppResult<()> {
    let requested = date.and_time(time);
    if requested - now < Duration::minutes(MIN_ADVANCE_MINUTES) {
        return Err(AppError::validation(
            "Reservations must be made at least 30 minutes in advance",
        ));
    }
    Ok(())
}

/// Match the requested time against the day's shifts.
///
/// Returns the shift the reservation lands in. The last bookable time is
/// one service window before close; a time inside the shift but past that
/// cutoff is refused with the cutoff in the message.
pub fn validate_opening_hours<'a>(
    date: NaiveDate,
    time: NaiveTime,
    shifts: &'a [Shift],
) -> AppResult<&'a Shift> {
    let day = day_name(date.weekday());
    if shifts.is_empty() {
        return Err(AppError::validation(format!(
            "Restaurant is closed on {day}s"
        )));
    }

    let Some(shift) = shifts.iter().find(|s| s.open <= time && time < s.close) else {
        return Err(AppError::validation(format!(
            "Restaurant is not open at {} on {day}s",
            time.format("%H:%M")
        )));
    };

    // Minutes since midnight, so a shift closing shortly after 00:00
    // cannot wrap the cutoff back to the previous evening
    if minutes_of(shift.close) - minutes_of(time) < SERVICE_WINDOW_MINUTES {
        let cutoff = (minutes_of(shift.close) - SERVICE_WINDOW_MINUTES).max(0);
        return Err(AppError::validation(format!(
            "Last reservation is at {:02}:{:02}",
            cutoff / 60,
            cutoff % 60
        )));
    }

    Ok(shift)
}

fn minutes_of(time: NaiveTime) -> i64 {
    i64::from(time.hour() * 60 + time.minute())
}

/// The requested time must sit on the restaurant's slot grid, anchored
/// at midnight.
pub fn validate_time_slot_interval(time: NaiveTime, interval: TimeSlotInterval) -> AppResult<()> {
    let interval_min = interval.minutes();
    let minutes = time.hour() * 60 + time.minute();
    if time.second() == 0 && minutes % interval_min == 0 {
        return Ok(());
    }

    let next = (minutes / interval_min + 1) * interval_min;
    let next_time = NaiveTime::from_hms_opt((next / 60) % 24, next % 60, 0)
        .unwrap_or(NaiveTime::MIN);
    Err(AppError::validation(format!(
        "Time must align with {interval_min}-minute intervals. Next valid time: {}",
        next_time.format("%H:%M")
    )))
}

/// Sum the party sizes of active reservations already sitting in this
/// shift and refuse the request if it would overflow the shift capacity.
///
/// `same_day` is every reservation stored for the restaurant on that
/// date; pending ones count because they provisionally hold their seats.
pub fn validate_capacity(
    same_day: &[Reservation],
    shift: &Shift,
    number_of_people: u32,
) -> AppResult<()> {
    let occupied: u32 = same_day
        .iter()
        .filter(|r| r.is_active() && shift.open <= r.time && r.time < shift.close)
        .map(|r| r.number_of_people)
        .sum();

    let available = shift.capacity.saturating_sub(occupied);
    if number_of_people > available {
        return Err(AppError::validation(format!(
            "No capacity available for this shift. Available: {available} people"
        )));
    }
    Ok(())
}

use rusqlite::Connection;

use crate::db::queries;
use crate::models::{Booking, Space};
use crate::services::availability::{compute_free_slots, occupied_slots, slot_hour};

#[derive(Debug)]
pub enum SchedulingError {
    InvalidRange,
    Unavailable { date: String },
    Conflict { date: String },
    Storage(anyhow::Error),
}

impl std::fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::InvalidRange => {
                write!(f, "end time must be after start time")
            }
            SchedulingError::Unavailable { date } => {
                write!(f, "the requested hours are not open for booking on {date}")
            }
            SchedulingError::Conflict { date } => {
                write!(f, "the requested hours are already booked on {date}")
            }
            SchedulingError::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

/// Validate one booking instance against the host's declared availability
/// and the bookings already stored for that space and date. Nothing is
/// written here; the caller persists only after every instance passes.
pub fn validate_booking(
    conn: &Connection,
    space: &Space,
    date: &str,
    start_time: &str,
    end_time: &str,
) -> Result<(), SchedulingError> {
    let (start, end) = match (slot_hour(start_time), slot_hour(end_time)) {
        (Some(s), Some(e)) if s < e => (s, e),
        _ => return Err(SchedulingError::InvalidRange),
    };

    let existing = queries::get_bookings_for_space_on_date(conn, &space.id, date)
        .map_err(SchedulingError::Storage)?;

    // Every requested hour must still be free once existing bookings are
    // subtracted from the declared slots.
    let free = compute_free_slots(space.declared_slots(date), &existing);
    let requested = occupied_slots(start_time, end_time);
    if !requested.iter().all(|slot| free.contains(slot)) {
        if overlaps_any(&existing, start, end) {
            return Err(SchedulingError::Conflict {
                date: date.to_string(),
            });
        }
        return Err(SchedulingError::Unavailable {
            date: date.to_string(),
        });
    }

    Ok(())
}

fn overlaps_any(bookings: &[Booking], start: u32, end: u32) -> bool {
    bookings.iter().any(|booking| {
        match (slot_hour(&booking.start_time), slot_hour(&booking.end_time)) {
            // Overlap: existing starts before requested ends AND existing
            // ends after requested starts.
            (Some(bs), Some(be)) => bs < end && be > start,
            _ => false,
        }
    })
}

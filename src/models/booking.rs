use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::Space;

/// A persisted reservation. `space` is a full snapshot taken at booking
/// time, so later edits to the listing never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub space: Space,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub total_price: f64,
    pub created_at: NaiveDateTime,
}

/// Everything needed to create a booking except its identity and date,
/// which the recurrence expander assigns per instance.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub user_id: String,
    pub space: Space,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub total_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    None,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Recurrence {
    #[serde(rename = "type")]
    pub recurrence_type: RecurrenceType,
    pub count: u32,
}

impl Default for Recurrence {
    fn default() -> Self {
        Recurrence {
            recurrence_type: RecurrenceType::None,
            count: 1,
        }
    }
}

/// Transient view handed back after a (possibly recurring) booking
/// request: the first instance plus the aggregate across all instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSummary {
    pub first_booking: Booking,
    pub recurrence_type: RecurrenceType,
    pub recurrence_count: u32,
    pub total_price: f64,
}

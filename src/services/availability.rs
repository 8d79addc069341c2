use crate::models::Booking;

/// Generic bookable window applied when a host never declared any
/// availability: 08:00 through 20:00 inclusive, 13 hour labels.
pub const FALLBACK_START_HOUR: u32 = 8;
pub const FALLBACK_END_HOUR: u32 = 20;

/// Hour component of a slot label, e.g. "14:00" -> 14.
pub fn slot_hour(label: &str) -> Option<u32> {
    let (hour, _) = label.split_once(':')?;
    hour.parse().ok().filter(|h| *h <= 23)
}

pub fn slot_label(hour: u32) -> String {
    format!("{hour:02}:00")
}

/// Inclusive run of hour labels, e.g. (8, 20) -> "08:00".."20:00".
pub fn full_day_slots(start_hour: u32, end_hour: u32) -> Vec<String> {
    (start_hour..=end_hour).map(slot_label).collect()
}

/// Slots still bookable on a date: the host's declared list (or the generic
/// full-day window when the host declared nothing), minus every hour
/// occupied by an existing booking. Relative ordering of the candidate set
/// is preserved; no sort is applied.
pub fn compute_free_slots(host_slots: Option<&[String]>, bookings: &[Booking]) -> Vec<String> {
    let candidates: Vec<String> = match host_slots {
        Some(slots) => slots.to_vec(),
        None => full_day_slots(FALLBACK_START_HOUR, FALLBACK_END_HOUR),
    };

    let mut booked: Vec<String> = Vec::new();
    for booking in bookings {
        booked.extend(occupied_slots(&booking.start_time, &booking.end_time));
    }

    candidates
        .into_iter()
        .filter(|slot| !booked.contains(slot))
        .collect()
}

/// Hour labels occupied by the half-open interval [start, end),
/// e.g. 10:00-12:00 -> ["10:00", "11:00"].
pub fn occupied_slots(start_time: &str, end_time: &str) -> Vec<String> {
    match (slot_hour(start_time), slot_hour(end_time)) {
        (Some(start), Some(end)) if start < end => (start..end).map(slot_label).collect(),
        _ => vec![],
    }
}

/// Valid end times for a booking starting at `start_time`, given the free
/// slots for the day. Walks the free list forward while the hours stay
/// consecutive, then appends the synthetic "(last hour + 1):00" label since
/// end times are exclusive. Whenever `start_time` is itself free the result
/// is non-empty.
pub fn compute_valid_end_times(start_time: &str, free_slots: &[String]) -> Vec<String> {
    let start_index = match free_slots.iter().position(|s| s == start_time) {
        Some(i) => i,
        None => return vec![],
    };
    let mut last_hour = match slot_hour(start_time) {
        Some(h) => h,
        None => return vec![],
    };

    let mut end_times = Vec::new();
    for slot in &free_slots[start_index + 1..] {
        match slot_hour(slot) {
            Some(hour) if hour == last_hour + 1 => {
                end_times.push(slot.clone());
                last_hour = hour;
            }
            _ => break,
        }
    }
    end_times.push(slot_label(last_hour + 1));
    end_times
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Booking, Location, Space, SpaceType};

    fn booking(date: &str, start: &str, end: &str) -> Booking {
        Booking {
            id: "bk-1".to_string(),
            user_id: "u-1".to_string(),
            space: test_space(),
            date: date.parse().unwrap(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            total_price: 25.0,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    fn test_space() -> Space {
        Space {
            id: "sp-1".to_string(),
            title: "Test".to_string(),
            space_type: SpaceType::Consultorio,
            description: String::new(),
            location: Location {
                address: String::new(),
                city: String::new(),
                lat: 0.0,
                lng: 0.0,
            },
            capacity: 1,
            price_per_hour: 25.0,
            amenities: vec![],
            images: vec![],
            host_id: "host-1".to_string(),
            rating: 0.0,
            review_count: 0,
            availability: Default::default(),
        }
    }

    fn labels(slots: &[&str]) -> Vec<String> {
        slots.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fallback_window_is_thirteen_labels() {
        let free = compute_free_slots(None, &[]);
        assert_eq!(free.len(), 13);
        assert_eq!(free.first().unwrap(), "08:00");
        assert_eq!(free.last().unwrap(), "20:00");
    }

    #[test]
    fn test_booked_hours_are_subtracted() {
        let host = labels(&["09:00", "10:00", "11:00"]);
        let bookings = vec![booking("2024-12-25", "10:00", "11:00")];
        let free = compute_free_slots(Some(&host), &bookings);
        assert_eq!(free, labels(&["09:00", "11:00"]));
    }

    #[test]
    fn test_multi_hour_booking_removes_each_hour() {
        let bookings = vec![booking("2024-12-25", "10:00", "12:00")];
        let free = compute_free_slots(None, &bookings);
        assert!(!free.contains(&"10:00".to_string()));
        assert!(!free.contains(&"11:00".to_string()));
        assert!(free.contains(&"12:00".to_string()));
        assert_eq!(free.len(), 11);
    }

    #[test]
    fn test_empty_declared_list_stays_empty() {
        let host: Vec<String> = vec![];
        let free = compute_free_slots(Some(&host), &[]);
        assert!(free.is_empty());
    }

    #[test]
    fn test_candidate_order_preserved() {
        // Host list deliberately unsorted; no sort is applied.
        let host = labels(&["14:00", "09:00", "10:00"]);
        let free = compute_free_slots(Some(&host), &[]);
        assert_eq!(free, labels(&["14:00", "09:00", "10:00"]));
    }

    #[test]
    fn test_occupied_slots_half_open() {
        assert_eq!(occupied_slots("10:00", "12:00"), labels(&["10:00", "11:00"]));
        assert_eq!(occupied_slots("10:00", "11:00"), labels(&["10:00"]));
        assert!(occupied_slots("12:00", "10:00").is_empty());
        assert!(occupied_slots("12:00", "12:00").is_empty());
    }

    #[test]
    fn test_end_times_contiguous_run() {
        let free = labels(&["09:00", "10:00", "11:00", "14:00"]);
        let ends = compute_valid_end_times("09:00", &free);
        // Run breaks at 14:00; synthetic end caps the run.
        assert_eq!(ends, labels(&["10:00", "11:00", "12:00"]));
    }

    #[test]
    fn test_end_times_gap_immediately_after_start() {
        let free = labels(&["09:00", "11:00"]);
        let ends = compute_valid_end_times("09:00", &free);
        assert_eq!(ends, labels(&["10:00"]));
    }

    #[test]
    fn test_end_times_start_is_last_slot() {
        let free = labels(&["09:00", "10:00"]);
        let ends = compute_valid_end_times("10:00", &free);
        assert_eq!(ends, labels(&["11:00"]));
    }

    #[test]
    fn test_end_times_start_not_free() {
        let free = labels(&["09:00", "10:00"]);
        assert!(compute_valid_end_times("12:00", &free).is_empty());
    }

    #[test]
    fn test_end_times_nonempty_when_start_free() {
        // The fallback window is one contiguous run, so every start walks
        // through to the synthetic 21:00 cap.
        let free = compute_free_slots(None, &[]);
        for slot in &free {
            let ends = compute_valid_end_times(slot, &free);
            assert!(!ends.is_empty(), "no end times for start {slot}");
            assert_eq!(
                slot_hour(ends.last().unwrap()),
                Some(FALLBACK_END_HOUR + 1)
            );
        }
    }

    #[test]
    fn test_slot_hour_parsing() {
        assert_eq!(slot_hour("08:00"), Some(8));
        assert_eq!(slot_hour("20:00"), Some(20));
        assert_eq!(slot_hour("24:00"), None);
        assert_eq!(slot_hour("nope"), None);
    }
}

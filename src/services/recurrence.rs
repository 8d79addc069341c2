use chrono::{Duration, Months, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::{Booking, BookingDraft, BookingSummary, Recurrence, RecurrenceType};

/// Expand a single booking request into its recurrence instances.
///
/// `none` always yields exactly one booking regardless of the requested
/// count. Weekly instances land 7*i days after the base date. Monthly
/// instances advance the calendar month with end-of-month clamping
/// (Jan 31 + 1 month = Feb 28/29), the rule `chrono::Months` implements.
/// Each instance gets a fresh uuid; the price carries over unchanged.
pub fn expand_recurrence(draft: &BookingDraft, recurrence: Recurrence) -> Vec<Booking> {
    let count = match recurrence.recurrence_type {
        RecurrenceType::None => 1,
        _ => recurrence.count.max(1),
    };

    let now = Utc::now().naive_utc();
    let mut bookings = Vec::with_capacity(count as usize);
    for i in 0..count {
        let date = instance_date(draft.date, recurrence.recurrence_type, i);
        bookings.push(Booking {
            id: Uuid::new_v4().to_string(),
            user_id: draft.user_id.clone(),
            space: draft.space.clone(),
            date,
            start_time: draft.start_time.clone(),
            end_time: draft.end_time.clone(),
            total_price: draft.total_price,
            created_at: now,
        });
    }
    bookings
}

fn instance_date(base: NaiveDate, recurrence_type: RecurrenceType, i: u32) -> NaiveDate {
    match recurrence_type {
        RecurrenceType::None => base,
        RecurrenceType::Weekly => base + Duration::days(7 * i as i64),
        RecurrenceType::Monthly => base
            .checked_add_months(Months::new(i))
            .unwrap_or(base),
    }
}

/// Confirmation view for a freshly expanded series: first instance plus the
/// aggregate price across all instances.
pub fn summarize(bookings: &[Booking], recurrence: Recurrence) -> Option<BookingSummary> {
    let first = bookings.first()?;
    let total: f64 = bookings.iter().map(|b| b.total_price).sum();
    Some(BookingSummary {
        first_booking: first.clone(),
        recurrence_type: recurrence.recurrence_type,
        recurrence_count: bookings.len() as u32,
        total_price: total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, Space, SpaceType};

    fn draft(date: &str) -> BookingDraft {
        BookingDraft {
            user_id: "u-1".to_string(),
            space: Space {
                id: "sp-1".to_string(),
                title: "Test".to_string(),
                space_type: SpaceType::Terapia,
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
            },
            date: date.parse().unwrap(),
            start_time: "10:00".to_string(),
            end_time: "12:00".to_string(),
            total_price: 50.0,
        }
    }

    fn recurrence(recurrence_type: RecurrenceType, count: u32) -> Recurrence {
        Recurrence {
            recurrence_type,
            count,
        }
    }

    #[test]
    fn test_none_forces_single_instance() {
        let bookings = expand_recurrence(&draft("2024-12-25"), recurrence(RecurrenceType::None, 5));
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].date.to_string(), "2024-12-25");
    }

    #[test]
    fn test_weekly_advances_seven_days() {
        let bookings =
            expand_recurrence(&draft("2024-12-25"), recurrence(RecurrenceType::Weekly, 3));
        assert_eq!(bookings.len(), 3);
        assert_eq!(bookings[0].date.to_string(), "2024-12-25");
        assert_eq!(bookings[1].date.to_string(), "2025-01-01");
        assert_eq!(bookings[2].date.to_string(), "2025-01-08");
    }

    #[test]
    fn test_monthly_clamps_to_month_end() {
        let bookings =
            expand_recurrence(&draft("2024-01-31"), recurrence(RecurrenceType::Monthly, 3));
        assert_eq!(bookings[0].date.to_string(), "2024-01-31");
        // 2024 is a leap year.
        assert_eq!(bookings[1].date.to_string(), "2024-02-29");
        assert_eq!(bookings[2].date.to_string(), "2024-03-31");
    }

    #[test]
    fn test_monthly_plain_dates_keep_day_of_month() {
        let bookings =
            expand_recurrence(&draft("2024-03-15"), recurrence(RecurrenceType::Monthly, 2));
        assert_eq!(bookings[1].date.to_string(), "2024-04-15");
    }

    #[test]
    fn test_instances_have_unique_ids_and_shared_price() {
        let bookings =
            expand_recurrence(&draft("2024-12-25"), recurrence(RecurrenceType::Weekly, 4));
        let mut ids: Vec<&str> = bookings.iter().map(|b| b.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert!(bookings.iter().all(|b| b.total_price == 50.0));
    }

    #[test]
    fn test_count_zero_treated_as_one() {
        let bookings =
            expand_recurrence(&draft("2024-12-25"), recurrence(RecurrenceType::Weekly, 0));
        assert_eq!(bookings.len(), 1);
    }

    #[test]
    fn test_summarize_aggregates_price() {
        let rec = recurrence(RecurrenceType::Weekly, 3);
        let bookings = expand_recurrence(&draft("2024-12-25"), rec);
        let summary = summarize(&bookings, rec).unwrap();
        assert_eq!(summary.recurrence_count, 3);
        assert_eq!(summary.total_price, 150.0);
        assert_eq!(summary.first_booking.date.to_string(), "2024-12-25");
    }

    #[test]
    fn test_summarize_empty_is_none() {
        assert!(summarize(&[], Recurrence::default()).is_none());
    }
}

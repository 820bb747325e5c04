use chrono::{Duration, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Booking;

/// The canonical bookable slots for any service on any day, in display
/// order: half-hour steps from 09:00 AM through 06:00 PM.
pub const TIME_SLOTS: [&str; 19] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "12:00 PM", "12:30 PM",
    "01:00 PM", "01:30 PM", "02:00 PM", "02:30 PM", "03:00 PM", "03:30 PM", "04:00 PM", "04:30 PM",
    "05:00 PM", "05:30 PM", "06:00 PM",
];

/// How far ahead a booking may be placed, in days (inclusive).
pub const BOOKING_WINDOW_DAYS: i64 = 60;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SlotStatus {
    #[schema(example = "10:00 AM")]
    pub label: String,
    pub bookable: bool,
}

pub fn is_canonical_slot(label: &str) -> bool {
    TIME_SLOTS.contains(&label)
}

/// A date is offerable from today (inclusive) through 60 days out
/// (inclusive). Treated as a hard validation boundary, not advice.
pub fn within_booking_window(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today && date <= today + Duration::days(BOOKING_WINDOW_DAYS)
}

fn taken_labels<'a>(
    bookings: &'a [Booking],
    service_id: &'a str,
    date: NaiveDate,
) -> impl Iterator<Item = &'a str> + 'a {
    bookings
        .iter()
        .filter(move |b| b.service_id == service_id && b.date == date && b.is_confirmed())
        .map(|b| b.time.as_str())
}

/// True if a confirmed booking already holds the slot. Cancelled bookings
/// never count; their slot is implicitly free again.
pub fn slot_taken(bookings: &[Booking], service_id: &str, date: NaiveDate, label: &str) -> bool {
    taken_labels(bookings, service_id, date).any(|t| t == label)
}

/// Computes the offered slot sequence for one service and date: every
/// canonical label, in canonical order, marked bookable unless a confirmed
/// booking holds it. Availability is always derived from current booking
/// status; there is no separate slot table to mutate.
pub fn available_slots(bookings: &[Booking], service_id: &str, date: NaiveDate) -> Vec<SlotStatus> {
    let taken: Vec<&str> = taken_labels(bookings, service_id, date).collect();
    TIME_SLOTS
        .iter()
        .map(|&label| SlotStatus {
            label: label.to_string(),
            bookable: !taken.contains(&label),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingStatus;
    use chrono::Utc;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn booking(service_id: &str, day: &str, time: &str, status: BookingStatus) -> Booking {
        Booking {
            id: "bkg_1".to_string(),
            service_id: service_id.to_string(),
            user_id: "user_1".to_string(),
            user_name: "Client".to_string(),
            user_email: "client@example.com".to_string(),
            date: date(day),
            time: time.to_string(),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn all_slots_open_with_no_bookings() {
        let slots = available_slots(&[], "svc_1", date("2025-06-01"));
        assert_eq!(slots.len(), 19);
        assert!(slots.iter().all(|s| s.bookable));
    }

    #[test]
    fn confirmed_booking_blocks_exactly_its_slot() {
        let bookings = vec![booking(
            "svc_1",
            "2025-06-01",
            "10:00 AM",
            BookingStatus::Confirmed,
        )];
        let slots = available_slots(&bookings, "svc_1", date("2025-06-01"));
        let blocked: Vec<&str> = slots
            .iter()
            .filter(|s| !s.bookable)
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(blocked, vec!["10:00 AM"]);
        assert_eq!(slots.iter().filter(|s| s.bookable).count(), 18);
    }

    #[test]
    fn other_service_or_date_does_not_block() {
        let bookings = vec![
            booking("svc_2", "2025-06-01", "10:00 AM", BookingStatus::Confirmed),
            booking("svc_1", "2025-06-02", "10:00 AM", BookingStatus::Confirmed),
        ];
        let slots = available_slots(&bookings, "svc_1", date("2025-06-01"));
        assert!(slots.iter().all(|s| s.bookable));
    }

    #[test]
    fn cancelled_booking_frees_its_slot() {
        let bookings = vec![booking(
            "svc_1",
            "2025-06-01",
            "10:00 AM",
            BookingStatus::Cancelled,
        )];
        let slots = available_slots(&bookings, "svc_1", date("2025-06-01"));
        assert!(slots.iter().all(|s| s.bookable));
        assert!(!slot_taken(&bookings, "svc_1", date("2025-06-01"), "10:00 AM"));
    }

    #[test]
    fn slot_order_follows_the_canonical_table() {
        let slots = available_slots(&[], "svc_1", date("2025-06-01"));
        let labels: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, TIME_SLOTS.to_vec());
    }

    #[test]
    fn taken_slot_is_excluded_from_the_offer() {
        let bookings = vec![booking(
            "svc_1",
            "2025-06-01",
            "02:30 PM",
            BookingStatus::Confirmed,
        )];
        assert!(slot_taken(&bookings, "svc_1", date("2025-06-01"), "02:30 PM"));
        let offered: Vec<String> = available_slots(&bookings, "svc_1", date("2025-06-01"))
            .into_iter()
            .filter(|s| s.bookable)
            .map(|s| s.label)
            .collect();
        assert!(!offered.iter().any(|s| s == "02:30 PM"));
    }

    #[test]
    fn canonical_slot_membership() {
        assert!(is_canonical_slot("09:00 AM"));
        assert!(is_canonical_slot("06:00 PM"));
        assert!(!is_canonical_slot("06:30 PM"));
        assert!(!is_canonical_slot("10:00"));
    }

    #[test]
    fn booking_window_is_inclusive_on_both_ends() {
        let today = date("2025-06-01");
        assert!(within_booking_window(today, today));
        assert!(within_booking_window(date("2025-07-31"), today));
        assert!(!within_booking_window(date("2025-08-01"), today));
        assert!(!within_booking_window(date("2025-05-31"), today));
    }
}

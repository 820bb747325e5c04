use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::models::{Booking, BookingStatus, Service, Session, User};
use crate::store::{Store, AUTH_KEY, BOOKINGS_KEY, SERVICES_KEY, USERS_KEY};

/// Generates a collision-resistant id of the form `{prefix}_{millis}_{suffix}`.
/// Good enough for a single writer; not cryptographically unique.
pub fn generate_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|c| (c as char).to_ascii_lowercase())
        .collect();
    format!("{prefix}_{millis}_{suffix}")
}

/// Fields of a service that may change after creation. Absent fields keep
/// their stored value.
#[derive(Debug, Default, Clone)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<u32>,
    pub price: Option<f64>,
}

/// Typed accessors over the four persisted collections. Every write is a
/// read-modify-write of the whole collection; lookups never fail, they
/// return `None` or an empty list.
pub struct Repository {
    store: Store,
}

impl Repository {
    pub fn new(store: Store) -> Self {
        Repository { store }
    }

    // ── users ──

    pub fn list_users(&self) -> Vec<User> {
        self.store.get(USERS_KEY).unwrap_or_default()
    }

    pub fn get_user_by_id(&self, id: &str) -> Option<User> {
        self.list_users().into_iter().find(|u| u.id == id)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.list_users()
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    pub fn create_user(&self, user: User) -> User {
        let mut users = self.list_users();
        users.push(user.clone());
        self.store.set(USERS_KEY, &users);
        user
    }

    // ── services ──

    pub fn list_services(&self) -> Vec<Service> {
        self.store.get(SERVICES_KEY).unwrap_or_default()
    }

    pub fn services_by_owner(&self, owner_id: &str) -> Vec<Service> {
        self.list_services()
            .into_iter()
            .filter(|s| s.owner_id == owner_id)
            .collect()
    }

    pub fn get_service_by_id(&self, id: &str) -> Option<Service> {
        self.list_services().into_iter().find(|s| s.id == id)
    }

    pub fn create_service(&self, service: Service) -> Service {
        let mut services = self.list_services();
        services.push(service.clone());
        self.store.set(SERVICES_KEY, &services);
        service
    }

    /// Merges the present patch fields into the stored record and stamps
    /// `updated_at`. Returns the merged record, or `None` if the id is
    /// unknown.
    pub fn update_service(&self, id: &str, patch: ServicePatch) -> Option<Service> {
        let mut services = self.list_services();
        let mut updated = None;
        for service in services.iter_mut() {
            if service.id == id {
                if let Some(name) = patch.name {
                    service.name = name;
                }
                if let Some(description) = patch.description {
                    service.description = description;
                }
                if let Some(duration) = patch.duration {
                    service.duration = duration;
                }
                if let Some(price) = patch.price {
                    service.price = price;
                }
                service.updated_at = Some(Utc::now());
                updated = Some(service.clone());
                break;
            }
        }
        if updated.is_some() {
            self.store.set(SERVICES_KEY, &services);
        }
        updated
    }

    /// Removes the service and, in the same logical operation, every booking
    /// referencing it. The cascade is what keeps bookings from dangling.
    /// Returns whether the service existed.
    pub fn delete_service(&self, id: &str) -> bool {
        let services = self.list_services();
        let before = services.len();
        let remaining: Vec<Service> = services.into_iter().filter(|s| s.id != id).collect();
        if remaining.len() == before {
            return false;
        }
        self.store.set(SERVICES_KEY, &remaining);
        let bookings: Vec<Booking> = self
            .list_bookings()
            .into_iter()
            .filter(|b| b.service_id != id)
            .collect();
        self.store.set(BOOKINGS_KEY, &bookings);
        true
    }

    // ── bookings ──

    pub fn list_bookings(&self) -> Vec<Booking> {
        self.store.get(BOOKINGS_KEY).unwrap_or_default()
    }

    pub fn bookings_by_user(&self, user_id: &str) -> Vec<Booking> {
        self.list_bookings()
            .into_iter()
            .filter(|b| b.user_id == user_id)
            .collect()
    }

    /// Two-stage join: resolve the owner's service ids first, then keep the
    /// bookings whose service is in that set.
    pub fn bookings_by_owner(&self, owner_id: &str) -> Vec<Booking> {
        let service_ids: Vec<String> = self
            .services_by_owner(owner_id)
            .into_iter()
            .map(|s| s.id)
            .collect();
        self.list_bookings()
            .into_iter()
            .filter(|b| service_ids.contains(&b.service_id))
            .collect()
    }

    pub fn get_booking_by_id(&self, id: &str) -> Option<Booking> {
        self.list_bookings().into_iter().find(|b| b.id == id)
    }

    pub fn create_booking(&self, booking: Booking) -> Booking {
        let mut bookings = self.list_bookings();
        bookings.push(booking.clone());
        self.store.set(BOOKINGS_KEY, &bookings);
        booking
    }

    /// One-way transition `confirmed -> cancelled`; the record is retained.
    /// Cancelling an already-cancelled booking leaves it unchanged.
    pub fn cancel_booking(&self, id: &str) -> Option<Booking> {
        let mut bookings = self.list_bookings();
        let mut cancelled = None;
        for booking in bookings.iter_mut() {
            if booking.id == id {
                booking.status = BookingStatus::Cancelled;
                cancelled = Some(booking.clone());
                break;
            }
        }
        if cancelled.is_some() {
            self.store.set(BOOKINGS_KEY, &bookings);
        }
        cancelled
    }

    // ── session ──

    pub fn get_session(&self) -> Option<Session> {
        self.store.get(AUTH_KEY)
    }

    pub fn save_session(&self, session: &Session) {
        self.store.set(AUTH_KEY, session);
    }

    pub fn clear_session(&self) {
        self.store.remove(AUTH_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, SessionUser};
    use crate::store::MemoryBackend;
    use chrono::NaiveDate;

    fn repo() -> Repository {
        Repository::new(Store::new(Box::new(MemoryBackend::new())))
    }

    fn user(id: &str, email: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            name: format!("name-{id}"),
            email: email.to_string(),
            password: "secret1".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    fn service(id: &str, owner_id: &str) -> Service {
        Service {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            name: "Haircut".to_string(),
            description: "Basic cut".to_string(),
            duration: 60,
            price: 500.0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn booking(id: &str, service_id: &str, user_id: &str, date: &str, time: &str) -> Booking {
        Booking {
            id: id.to_string(),
            service_id: service_id.to_string(),
            user_id: user_id.to_string(),
            user_name: "Client".to_string(),
            user_email: "client@example.com".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            time: time.to_string(),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn email_lookup_is_case_insensitive() {
        let repo = repo();
        repo.create_user(user("user_1", "a@b.com", Role::User));
        let found = repo.find_user_by_email("A@B.com").unwrap();
        assert_eq!(found.id, "user_1");
    }

    #[test]
    fn missing_lookups_return_none_or_empty() {
        let repo = repo();
        assert!(repo.get_user_by_id("nope").is_none());
        assert!(repo.get_service_by_id("nope").is_none());
        assert!(repo.get_booking_by_id("nope").is_none());
        assert!(repo.bookings_by_owner("nope").is_empty());
        assert!(!repo.delete_service("nope"));
    }

    #[test]
    fn update_service_merges_fields_and_stamps_updated_at() {
        let repo = repo();
        repo.create_service(service("svc_1", "owner_1"));
        let patch = ServicePatch {
            price: Some(750.0),
            ..Default::default()
        };
        let updated = repo.update_service("svc_1", patch).unwrap();
        assert_eq!(updated.price, 750.0);
        assert_eq!(updated.name, "Haircut");
        assert!(updated.updated_at.is_some());
        assert!(repo.update_service("ghost", ServicePatch::default()).is_none());
    }

    #[test]
    fn deleting_a_service_cascades_to_its_bookings() {
        let repo = repo();
        repo.create_service(service("svc_1", "owner_1"));
        repo.create_service(service("svc_2", "owner_1"));
        repo.create_booking(booking("bkg_1", "svc_1", "user_1", "2025-06-01", "10:00 AM"));
        repo.create_booking(booking("bkg_2", "svc_2", "user_1", "2025-06-01", "11:00 AM"));

        assert!(repo.delete_service("svc_1"));

        assert!(repo.get_service_by_id("svc_1").is_none());
        let remaining = repo.list_bookings();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "bkg_2");
        assert!(remaining.iter().all(|b| b.service_id != "svc_1"));
    }

    #[test]
    fn owner_view_is_empty_after_deleting_their_only_service() {
        let repo = repo();
        repo.create_service(service("svc_1", "owner_1"));
        repo.create_booking(booking("bkg_1", "svc_1", "user_1", "2025-06-01", "10:00 AM"));
        assert_eq!(repo.bookings_by_owner("owner_1").len(), 1);

        repo.delete_service("svc_1");

        assert!(repo.bookings_by_owner("owner_1").is_empty());
        assert!(repo.list_bookings().is_empty());
    }

    #[test]
    fn owner_bookings_join_only_matches_their_services() {
        let repo = repo();
        repo.create_service(service("svc_1", "owner_1"));
        repo.create_service(service("svc_2", "owner_2"));
        repo.create_booking(booking("bkg_1", "svc_1", "user_1", "2025-06-01", "10:00 AM"));
        repo.create_booking(booking("bkg_2", "svc_2", "user_1", "2025-06-01", "10:00 AM"));

        let mine = repo.bookings_by_owner("owner_1");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "bkg_1");
        assert_eq!(repo.bookings_by_user("user_1").len(), 2);
    }

    #[test]
    fn cancel_is_one_way_and_keeps_the_record() {
        let repo = repo();
        repo.create_booking(booking("bkg_1", "svc_1", "user_1", "2025-06-01", "10:00 AM"));

        let cancelled = repo.cancel_booking("bkg_1").unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        // Idempotent on an already-cancelled booking.
        let again = repo.cancel_booking("bkg_1").unwrap();
        assert_eq!(again.status, BookingStatus::Cancelled);
        assert_eq!(repo.list_bookings().len(), 1);
        assert!(repo.cancel_booking("ghost").is_none());
    }

    #[test]
    fn cancelling_frees_the_slot_for_rebooking() {
        use crate::availability::{available_slots, slot_taken};

        let repo = repo();
        let day = NaiveDate::parse_from_str("2025-06-01", "%Y-%m-%d").unwrap();
        repo.create_service(service("svc_1", "owner_1"));
        repo.create_booking(booking("bkg_1", "svc_1", "user_1", "2025-06-01", "10:00 AM"));
        assert!(slot_taken(&repo.list_bookings(), "svc_1", day, "10:00 AM"));

        repo.cancel_booking("bkg_1");

        // No separate release step: availability is derived from status.
        assert!(!slot_taken(&repo.list_bookings(), "svc_1", day, "10:00 AM"));
        let slots = available_slots(&repo.list_bookings(), "svc_1", day);
        assert!(slots.iter().all(|s| s.bookable));
    }

    #[test]
    fn session_record_roundtrips_and_clears() {
        let repo = repo();
        assert!(repo.get_session().is_none());
        let session = Session {
            user: SessionUser {
                id: "user_1".to_string(),
                name: "Alice".to_string(),
                email: "a@b.com".to_string(),
                role: Role::Owner,
            },
            token: "jwt".to_string(),
        };
        repo.save_session(&session);
        assert_eq!(repo.get_session().unwrap().user.id, "user_1");
        repo.clear_session();
        assert!(repo.get_session().is_none());
    }

    #[test]
    fn generated_ids_carry_prefix_and_are_distinct() {
        let a = generate_id("svc");
        let b = generate_id("svc");
        assert!(a.starts_with("svc_"));
        assert_eq!(a.split('_').count(), 3);
        assert_eq!(a.split('_').nth(2).unwrap().len(), 9);
        assert_ne!(a, b);
    }
}

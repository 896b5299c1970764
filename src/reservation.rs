// Reservation ledger: creates and cancels reservations, cross-checking the
// customer registry and taking/releasing hotel rooms as a side effect

use std::{fmt, path::Path};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    config::StoreConfig,
    customer::CustomerRegistry,
    hotel::HotelRegistry,
    store::{JsonStore, Records, StoreError},
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Why a ledger operation was refused
#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("Customer {0} does not exist")]
    UnknownCustomer(String),

    #[error("No room available at hotel {0}")]
    NoRoomAvailable(String),

    #[error("Reservation {0} does not exist")]
    NotFound(String),

    #[error("Reservation {0} is already cancelled")]
    AlreadyCancelled(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Active,
    Cancelled,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Active => f.write_str("active"),
            ReservationStatus::Cancelled => f.write_str("cancelled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: String,
    pub customer_id: String,
    pub hotel_id: String,
    // Kept as given; never validated or ordered
    pub check_in: String,
    pub check_out: String,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn new(
        reservation_id: impl Into<String>,
        customer_id: impl Into<String>,
        hotel_id: impl Into<String>,
        check_in: impl Into<String>,
        check_out: impl Into<String>,
    ) -> Self {
        Self {
            reservation_id: reservation_id.into(),
            customer_id: customer_id.into(),
            hotel_id: hotel_id.into(),
            check_in: check_in.into(),
            check_out: check_out.into(),
            status: ReservationStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    /// Length of stay in nights, or `None` if either date is not `YYYY-MM-DD`.
    /// Can be zero or negative: dates are stored unchecked.
    pub fn nights(&self) -> Option<i64> {
        let check_in = NaiveDate::parse_from_str(&self.check_in, DATE_FORMAT).ok()?;
        let check_out = NaiveDate::parse_from_str(&self.check_out, DATE_FORMAT).ok()?;
        Some((check_out - check_in).num_days())
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reservation ID: {}\nCustomer ID: {}\nHotel ID: {}\nCheck-in: {}\nCheck-out: {}\nStatus: {}",
            self.reservation_id,
            self.customer_id,
            self.hotel_id,
            self.check_in,
            self.check_out,
            self.status
        )
    }
}

pub struct ReservationLedger {
    customers: CustomerRegistry,
    hotels: HotelRegistry,
    store: JsonStore<Reservation>,
}

impl ReservationLedger {
    pub fn new(customers: CustomerRegistry, hotels: HotelRegistry, path: impl AsRef<Path>) -> Self {
        Self {
            customers,
            hotels,
            store: JsonStore::new(path, "reservations"),
        }
    }

    // Ledger plus both registries, each on its own file from `config`
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            CustomerRegistry::new(config.customers_path()),
            HotelRegistry::new(config.hotels_path()),
            config.reservations_path(),
        )
    }

    pub fn customers(&self) -> &CustomerRegistry {
        &self.customers
    }

    pub fn hotels(&self) -> &HotelRegistry {
        &self.hotels
    }

    /// Books a room and records an active reservation.
    ///
    /// The room is taken before the reservation is written. If that write
    /// fails the room is handed back; if handing it back also fails the
    /// hotel stays one room short and the error is logged.
    pub fn try_create(
        &self,
        reservation_id: &str,
        customer_id: &str,
        hotel_id: &str,
        check_in: &str,
        check_out: &str,
    ) -> Result<Reservation, ReservationError> {
        if !self.customers.exists(customer_id) {
            return Err(ReservationError::UnknownCustomer(customer_id.to_string()));
        }
        if !self.hotels.reserve_room(hotel_id) {
            return Err(ReservationError::NoRoomAvailable(hotel_id.to_string()));
        }

        let reservation = Reservation::new(reservation_id, customer_id, hotel_id, check_in, check_out);
        let mut reservations = self.store.load();
        reservations.insert(reservation_id.to_string(), reservation.clone());

        if let Err(e) = self.store.try_save(&reservations) {
            if self.hotels.release_room(hotel_id) {
                tracing::warn!(reservation_id, hotel_id, "room handed back after failed write");
            } else {
                tracing::error!(
                    reservation_id,
                    hotel_id,
                    "could not hand back room; hotel availability is now one short"
                );
            }
            return Err(e.into());
        }

        tracing::debug!(reservation_id, customer_id, hotel_id, "reservation created");
        Ok(reservation)
    }

    pub fn create(
        &self,
        reservation_id: &str,
        customer_id: &str,
        hotel_id: &str,
        check_in: &str,
        check_out: &str,
    ) -> Option<Reservation> {
        match self.try_create(reservation_id, customer_id, hotel_id, check_in, check_out) {
            Ok(reservation) => Some(reservation),
            Err(e) => {
                tracing::warn!(reservation_id, error = %e, "reservation not created");
                None
            }
        }
    }

    /// Cancels an active reservation and frees a room at its hotel.
    ///
    /// Succeeds even when the hotel refuses the release (hotel deleted, or
    /// already at full availability).
    pub fn try_cancel(&self, reservation_id: &str) -> Result<(), ReservationError> {
        let mut reservations = self.store.load();
        let Some(reservation) = reservations.get_mut(reservation_id) else {
            return Err(ReservationError::NotFound(reservation_id.to_string()));
        };
        if !reservation.is_active() {
            return Err(ReservationError::AlreadyCancelled(reservation_id.to_string()));
        }

        if !self.hotels.release_room(&reservation.hotel_id) {
            tracing::warn!(
                reservation_id,
                hotel_id = %reservation.hotel_id,
                "hotel did not release a room"
            );
        }
        reservation.status = ReservationStatus::Cancelled;
        self.store.save(&reservations);
        tracing::debug!(reservation_id, "reservation cancelled");
        Ok(())
    }

    pub fn cancel(&self, reservation_id: &str) -> bool {
        match self.try_cancel(reservation_id) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(reservation_id, error = %e, "reservation not cancelled");
                false
            }
        }
    }

    pub fn get(&self, reservation_id: &str) -> Option<Reservation> {
        self.store.load().remove(reservation_id)
    }

    pub fn get_display(&self, reservation_id: &str) -> Option<String> {
        self.get(reservation_id).map(|reservation| reservation.to_string())
    }

    // Removes the record only; hotel availability is left as it is
    pub fn delete(&self, reservation_id: &str) -> bool {
        let mut reservations = self.store.load();
        if reservations.remove(reservation_id).is_none() {
            return false;
        }
        self.store.save(&reservations);
        tracing::debug!(reservation_id, "reservation deleted");
        true
    }

    pub fn list(&self) -> Vec<Reservation> {
        self.store.load().into_values().collect()
    }

    pub fn load_all(&self) -> Records<Reservation> {
        self.store.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn ledger(dir: &TempDir) -> ReservationLedger {
        ReservationLedger::from_config(&StoreConfig::in_dir(dir.path()))
    }

    fn seeded(dir: &TempDir, rooms: u32) -> ReservationLedger {
        let ledger = ledger(dir);
        ledger
            .customers()
            .create("C001", "Juan Perez", "juan@example.com", "555-0101");
        ledger
            .hotels()
            .create("H001", "Grand Plaza", "New York, NY", rooms);
        ledger
    }

    #[test]
    fn test_create_reservation() {
        let dir = TempDir::new().unwrap();
        let ledger = seeded(&dir, 5);

        let reservation = ledger
            .create("R001", "C001", "H001", "2026-03-15", "2026-03-20")
            .unwrap();
        assert_eq!(reservation.status, ReservationStatus::Active);
        assert_eq!(ledger.get("R001"), Some(reservation));
        assert_eq!(ledger.hotels().get("H001").unwrap().available_rooms, 4);
    }

    #[test]
    fn test_create_with_unknown_customer() {
        let dir = TempDir::new().unwrap();
        let ledger = seeded(&dir, 5);

        let result = ledger.try_create("R001", "C999", "H001", "2026-03-15", "2026-03-20");
        assert!(matches!(result, Err(ReservationError::UnknownCustomer(id)) if id == "C999"));
        assert!(ledger.get("R001").is_none());
        assert_eq!(ledger.hotels().get("H001").unwrap().available_rooms, 5);
        assert!(!dir.path().join("reservations.json").exists());
    }

    #[test]
    fn test_create_with_full_hotel() {
        let dir = TempDir::new().unwrap();
        let ledger = seeded(&dir, 0);

        let result = ledger.try_create("R001", "C001", "H001", "2026-03-15", "2026-03-20");
        assert!(matches!(result, Err(ReservationError::NoRoomAvailable(id)) if id == "H001"));
        assert!(ledger.get("R001").is_none());
        assert_eq!(ledger.hotels().get("H001").unwrap().available_rooms, 0);
    }

    #[test]
    fn test_create_with_unknown_hotel() {
        let dir = TempDir::new().unwrap();
        let ledger = seeded(&dir, 1);

        assert!(ledger
            .create("R001", "C001", "H999", "2026-03-15", "2026-03-20")
            .is_none());
        assert!(ledger.list().is_empty());
    }

    #[test]
    fn test_failed_write_hands_room_back() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::in_dir(dir.path());
        let ledger = ReservationLedger::new(
            CustomerRegistry::new(config.customers_path()),
            HotelRegistry::new(config.hotels_path()),
            dir.path().join("missing").join("reservations.json"),
        );
        ledger
            .customers()
            .create("C001", "Juan Perez", "juan@example.com", "555-0101");
        ledger.hotels().create("H001", "Grand Plaza", "New York, NY", 1);

        let result = ledger.try_create("R001", "C001", "H001", "2026-03-15", "2026-03-20");
        assert!(matches!(result, Err(ReservationError::Store(_))));
        assert_eq!(ledger.hotels().get("H001").unwrap().available_rooms, 1);
    }

    #[test]
    fn test_cancel_reservation() {
        let dir = TempDir::new().unwrap();
        let ledger = seeded(&dir, 1);
        ledger.create("R001", "C001", "H001", "2026-03-15", "2026-03-20");

        assert!(ledger.cancel("R001"));
        let reservation = ledger.get("R001").unwrap();
        assert_eq!(reservation.status, ReservationStatus::Cancelled);
        assert_eq!(ledger.hotels().get("H001").unwrap().available_rooms, 1);
    }

    #[test]
    fn test_cancel_twice() {
        let dir = TempDir::new().unwrap();
        let ledger = seeded(&dir, 2);
        ledger.create("R001", "C001", "H001", "2026-03-15", "2026-03-20");

        assert!(ledger.cancel("R001"));
        assert!(matches!(
            ledger.try_cancel("R001"),
            Err(ReservationError::AlreadyCancelled(_))
        ));
        assert_eq!(ledger.hotels().get("H001").unwrap().available_rooms, 2);
    }

    #[test]
    fn test_cancel_nonexistent_reservation() {
        let dir = TempDir::new().unwrap();
        let ledger = seeded(&dir, 2);

        assert!(matches!(
            ledger.try_cancel("R999"),
            Err(ReservationError::NotFound(_))
        ));
        assert!(!ledger.cancel("R999"));
    }

    #[test]
    fn test_cancel_after_hotel_deleted_still_succeeds() {
        let dir = TempDir::new().unwrap();
        let ledger = seeded(&dir, 2);
        ledger.create("R001", "C001", "H001", "2026-03-15", "2026-03-20");
        ledger.hotels().delete("H001");

        assert!(ledger.cancel("R001"));
        assert_eq!(
            ledger.get("R001").unwrap().status,
            ReservationStatus::Cancelled
        );
    }

    #[test]
    fn test_delete_reservation() {
        let dir = TempDir::new().unwrap();
        let ledger = seeded(&dir, 2);
        ledger.create("R001", "C001", "H001", "2026-03-15", "2026-03-20");

        let path = dir.path().join("reservations.json");
        let before = fs::read(&path).unwrap();
        assert!(!ledger.delete("R999"));
        assert_eq!(fs::read(&path).unwrap(), before);

        assert!(ledger.delete("R001"));
        assert!(ledger.get("R001").is_none());
        assert_eq!(ledger.hotels().get("H001").unwrap().available_rooms, 1);
    }

    #[test]
    fn test_display_reservation() {
        let dir = TempDir::new().unwrap();
        let ledger = seeded(&dir, 2);
        ledger.create("R001", "C001", "H001", "2026-03-15", "2026-03-20");

        assert_eq!(
            ledger.get_display("R001").unwrap(),
            "Reservation ID: R001\nCustomer ID: C001\nHotel ID: H001\nCheck-in: 2026-03-15\nCheck-out: 2026-03-20\nStatus: active"
        );
        assert!(ledger.get_display("R999").is_none());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let dir = TempDir::new().unwrap();
        let ledger = seeded(&dir, 2);
        ledger.create("R001", "C001", "H001", "2026-03-15", "2026-03-20");
        ledger.cancel("R001");

        let content = fs::read_to_string(dir.path().join("reservations.json")).unwrap();
        assert!(content.contains("\"status\": \"cancelled\""));
    }

    #[test]
    fn test_nights() {
        let reservation = Reservation::new("R001", "C001", "H001", "2026-03-15", "2026-03-20");
        assert_eq!(reservation.nights(), Some(5));

        let reversed = Reservation::new("R002", "C001", "H001", "2026-03-20", "2026-03-15");
        assert_eq!(reversed.nights(), Some(-5));

        let garbage = Reservation::new("R003", "C001", "H001", "soon", "2026-03-15");
        assert_eq!(garbage.nights(), None);
    }

    #[test]
    fn test_dates_are_not_validated() {
        let dir = TempDir::new().unwrap();
        let ledger = seeded(&dir, 2);

        let reservation = ledger.create("R001", "C001", "H001", "not-a-date", "");
        assert!(reservation.is_some());
    }
}

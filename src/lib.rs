// Hotel reservation record system: customers, hotels and reservations kept in flat JSON files

pub mod config;
pub mod customer;
pub mod hotel;
pub mod reservation;
pub mod store;

// Re-export key types for convenience
pub use config::StoreConfig;
pub use customer::{Customer, CustomerRegistry, CustomerUpdate};
pub use hotel::{Hotel, HotelRegistry, HotelUpdate};
pub use reservation::{Reservation, ReservationError, ReservationLedger, ReservationStatus};
pub use store::{JsonStore, Records, StoreError};

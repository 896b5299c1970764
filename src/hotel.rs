// Hotel registry: CRUD over hotel records plus room-capacity bookkeeping

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::store::{JsonStore, Records};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredHotel")]
pub struct Hotel {
    pub hotel_id: String,
    pub name: String,
    pub location: String,
    pub total_rooms: u32,
    // Signed: shrinking total_rooms below the rooms in use drives this negative
    pub available_rooms: i64,
}

// On-disk shape; records written without `available_rooms` start fully available
#[derive(Deserialize)]
struct StoredHotel {
    hotel_id: String,
    name: String,
    location: String,
    total_rooms: u32,
    available_rooms: Option<i64>,
}

impl From<StoredHotel> for Hotel {
    fn from(stored: StoredHotel) -> Self {
        Self {
            available_rooms: stored
                .available_rooms
                .unwrap_or_else(|| i64::from(stored.total_rooms)),
            hotel_id: stored.hotel_id,
            name: stored.name,
            location: stored.location,
            total_rooms: stored.total_rooms,
        }
    }
}

impl Hotel {
    pub fn new(
        hotel_id: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
        total_rooms: u32,
    ) -> Self {
        Self {
            hotel_id: hotel_id.into(),
            name: name.into(),
            location: location.into(),
            total_rooms,
            available_rooms: i64::from(total_rooms),
        }
    }

    pub fn rooms_in_use(&self) -> i64 {
        i64::from(self.total_rooms) - self.available_rooms
    }

    fn apply(&mut self, update: HotelUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(total_rooms) = update.total_rooms {
            let delta = i64::from(total_rooms) - i64::from(self.total_rooms);
            self.total_rooms = total_rooms;
            self.available_rooms += delta;
        }
    }
}

impl fmt::Display for Hotel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hotel ID: {}\nName: {}\nLocation: {}\nTotal Rooms: {}\nAvailable Rooms: {}",
            self.hotel_id, self.name, self.location, self.total_rooms, self.available_rooms
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotelUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub total_rooms: Option<u32>,
}

impl HotelUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn total_rooms(mut self, total_rooms: u32) -> Self {
        self.total_rooms = Some(total_rooms);
        self
    }
}

pub struct HotelRegistry {
    store: JsonStore<Hotel>,
}

impl HotelRegistry {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            store: JsonStore::new(path, "hotels"),
        }
    }

    /// Registers a hotel with every room available, overwriting any record
    /// with the same id.
    pub fn create(&self, hotel_id: &str, name: &str, location: &str, total_rooms: u32) -> Hotel {
        let hotel = Hotel::new(hotel_id, name, location, total_rooms);
        let mut hotels = self.store.load();
        hotels.insert(hotel_id.to_string(), hotel.clone());
        self.store.save(&hotels);
        tracing::debug!(hotel_id, total_rooms, "hotel registered");
        hotel
    }

    pub fn delete(&self, hotel_id: &str) -> bool {
        let mut hotels = self.store.load();
        if hotels.remove(hotel_id).is_none() {
            return false;
        }
        self.store.save(&hotels);
        tracing::debug!(hotel_id, "hotel deleted");
        true
    }

    pub fn get(&self, hotel_id: &str) -> Option<Hotel> {
        self.store.load().remove(hotel_id)
    }

    pub fn get_display(&self, hotel_id: &str) -> Option<String> {
        self.get(hotel_id).map(|hotel| hotel.to_string())
    }

    /// Applies the provided fields. A new `total_rooms` shifts
    /// `available_rooms` by the same delta, keeping the rooms-in-use count;
    /// the result is not clamped.
    pub fn modify(&self, hotel_id: &str, update: HotelUpdate) -> bool {
        let mut hotels = self.store.load();
        let Some(hotel) = hotels.get_mut(hotel_id) else {
            return false;
        };
        hotel.apply(update);
        if hotel.available_rooms < 0 {
            tracing::warn!(
                hotel_id,
                total_rooms = hotel.total_rooms,
                available_rooms = hotel.available_rooms,
                "total rooms reduced below rooms in use"
            );
        }
        self.store.save(&hotels);
        tracing::debug!(hotel_id, "hotel modified");
        true
    }

    pub fn exists(&self, hotel_id: &str) -> bool {
        self.store.load().contains_key(hotel_id)
    }

    pub fn list(&self) -> Vec<Hotel> {
        self.store.load().into_values().collect()
    }

    pub fn load_all(&self) -> Records<Hotel> {
        self.store.load()
    }

    /// Takes one room. Fails without touching the store when the hotel is
    /// unknown or fully booked.
    pub fn reserve_room(&self, hotel_id: &str) -> bool {
        let mut hotels = self.store.load();
        match hotels.get_mut(hotel_id) {
            Some(hotel) if hotel.available_rooms > 0 => {
                hotel.available_rooms -= 1;
                let available_rooms = hotel.available_rooms;
                self.store.save(&hotels);
                tracing::debug!(hotel_id, available_rooms, "room reserved");
                true
            }
            _ => false,
        }
    }

    /// Frees one room. Fails without touching the store when the hotel is
    /// unknown or already has every room available.
    pub fn release_room(&self, hotel_id: &str) -> bool {
        let mut hotels = self.store.load();
        match hotels.get_mut(hotel_id) {
            Some(hotel) if hotel.available_rooms < i64::from(hotel.total_rooms) => {
                hotel.available_rooms += 1;
                let available_rooms = hotel.available_rooms;
                self.store.save(&hotels);
                tracing::debug!(hotel_id, available_rooms, "room released");
                true
            }
            _ => false,
        }
    }

    pub fn cancel_reservation(&self, hotel_id: &str) -> bool {
        self.release_room(hotel_id)
    }
}

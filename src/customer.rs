// Customer registry: CRUD over customer records keyed by customer id

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::store::{JsonStore, Records};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Customer {
    pub fn new(
        customer_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    fn apply(&mut self, update: CustomerUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Customer ID: {}\nName: {}\nEmail: {}\nPhone: {}",
            self.customer_id, self.name, self.email, self.phone
        )
    }
}

// Field-level modification request; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CustomerUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

pub struct CustomerRegistry {
    store: JsonStore<Customer>,
}

impl CustomerRegistry {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            store: JsonStore::new(path, "customers"),
        }
    }

    /// Registers a customer, overwriting any record with the same id.
    pub fn create(
        &self,
        customer_id: &str,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Customer {
        let customer = Customer::new(customer_id, name, email, phone);
        let mut customers = self.store.load();
        customers.insert(customer_id.to_string(), customer.clone());
        self.store.save(&customers);
        tracing::debug!(customer_id, "customer registered");
        customer
    }

    pub fn delete(&self, customer_id: &str) -> bool {
        let mut customers = self.store.load();
        if customers.remove(customer_id).is_none() {
            return false;
        }
        self.store.save(&customers);
        tracing::debug!(customer_id, "customer deleted");
        true
    }

    pub fn get(&self, customer_id: &str) -> Option<Customer> {
        self.store.load().remove(customer_id)
    }

    pub fn get_display(&self, customer_id: &str) -> Option<String> {
        self.get(customer_id).map(|customer| customer.to_string())
    }

    pub fn modify(&self, customer_id: &str, update: CustomerUpdate) -> bool {
        let mut customers = self.store.load();
        let Some(customer) = customers.get_mut(customer_id) else {
            return false;
        };
        customer.apply(update);
        self.store.save(&customers);
        tracing::debug!(customer_id, "customer modified");
        true
    }

    pub fn exists(&self, customer_id: &str) -> bool {
        self.store.load().contains_key(customer_id)
    }

    pub fn list(&self) -> Vec<Customer> {
        self.store.load().into_values().collect()
    }

    pub fn load_all(&self) -> Records<Customer> {
        self.store.load()
    }
}

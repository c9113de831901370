use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::communication::{ChatCommunication, VoiceCommunication};
use crate::domain::product::ProductExtended;

/// Customer record as exposed by the API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier of the customer.
    pub id: i32,
    /// Contact e-mail, unique across customers.
    pub email: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Contact phone number.
    pub phone_number: String,
}

/// Customer together with the products they own and their communication history.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerExtended {
    /// Unique identifier of the customer.
    pub id: i32,
    /// Contact e-mail, unique across customers.
    pub email: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Products owned by the customer, each with its categories.
    pub products: Vec<ProductExtended>,
    /// Chat messages exchanged with the customer, newest first.
    pub chat_communications: Vec<ChatCommunication>,
    /// Voice calls held with the customer, newest first.
    pub voice_communications: Vec<VoiceCommunication>,
}

/// Payload required to insert a new customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub email: String,
    pub name: String,
    pub surname: String,
    pub phone_number: String,
    /// Products connected to the customer on creation.
    pub product_ids: Vec<i32>,
}

impl NewCustomer {
    /// Build a new customer payload without any connected products.
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into().to_lowercase(),
            name: name.into(),
            surname: surname.into(),
            phone_number: phone_number.into(),
            product_ids: Vec::new(),
        }
    }

    /// Connect the given products to the customer.
    pub fn with_product_ids(mut self, product_ids: impl Into<Vec<i32>>) -> Self {
        self.product_ids = product_ids.into();
        self
    }
}

/// Patch data applied when updating an existing customer.
///
/// Only the fields that are `Some` are written. `product_ids`, when present,
/// replaces the whole set of owned products, including with an empty set.
#[derive(Debug, Clone)]
pub struct UpdateCustomer {
    pub email: Option<String>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone_number: Option<String>,
    pub product_ids: Option<Vec<i32>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateCustomer {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateCustomer {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            email: None,
            name: None,
            surname: None,
            phone_number: None,
            product_ids: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into().to_lowercase());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    pub fn phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// Replace the set of products owned by the customer.
    pub fn product_ids(mut self, product_ids: impl Into<Vec<i32>>) -> Self {
        self.product_ids = Some(product_ids.into());
        self
    }
}

/// Filters applied when listing customers. String filters are
/// case-insensitive substring matches; absent fields are unconstrained.
#[derive(Debug, Clone, Default)]
pub struct CustomerFilters {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl CustomerFilters {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, CustomerExtended as DomainCustomerExtended,
    NewCustomer as DomainNewCustomer, UpdateCustomer as DomainUpdateCustomer,
};
use crate::models::communication::{ChatCommunication, VoiceCommunication};
use crate::models::product::ProductWithCategories;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
pub struct Customer {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub phone_number: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
pub struct NewCustomer<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub surname: &'a str,
    pub phone_number: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
pub struct UpdateCustomer<'a> {
    pub email: Option<&'a str>,
    pub name: Option<&'a str>,
    pub surname: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Row of the customer/product ownership join table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::customer_products)]
pub struct CustomerProduct {
    pub customer_id: i32,
    pub product_id: i32,
}

/// Customer row loaded with everything the extended view exposes.
#[derive(Debug, Clone)]
pub struct CustomerWithRelations {
    pub customer: Customer,
    pub products: Vec<ProductWithCategories>,
    pub chat_communications: Vec<ChatCommunication>,
    pub voice_communications: Vec<VoiceCommunication>,
}

impl From<Customer> for DomainCustomer {
    fn from(value: Customer) -> Self {
        Self {
            id: value.id,
            email: value.email,
            name: value.name,
            surname: value.surname,
            phone_number: value.phone_number,
        }
    }
}

impl From<CustomerWithRelations> for DomainCustomerExtended {
    fn from(value: CustomerWithRelations) -> Self {
        let CustomerWithRelations {
            customer,
            products,
            chat_communications,
            voice_communications,
        } = value;
        Self {
            id: customer.id,
            email: customer.email,
            name: customer.name,
            surname: customer.surname,
            phone_number: customer.phone_number,
            products: products.into_iter().map(Into::into).collect(),
            chat_communications: chat_communications.into_iter().map(Into::into).collect(),
            voice_communications: voice_communications.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(value: &'a DomainNewCustomer) -> Self {
        Self {
            email: value.email.as_str(),
            name: value.name.as_str(),
            surname: value.surname.as_str(),
            phone_number: value.phone_number.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateCustomer> for UpdateCustomer<'a> {
    fn from(value: &'a DomainUpdateCustomer) -> Self {
        Self {
            email: value.email.as_deref(),
            name: value.name.as_deref(),
            surname: value.surname.as_deref(),
            phone_number: value.phone_number.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

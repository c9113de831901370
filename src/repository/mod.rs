use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{
    Category, CategoryExtended, CategoryFilters, NewCategory, UpdateCategory,
};
use crate::domain::communication::{
    ChatCommunication, ChatCommunicationExtended, ChatCommunicationFilters,
    NewChatCommunication, NewVoiceCommunication, UpdateChatCommunication,
    UpdateVoiceCommunication, VoiceCommunication, VoiceCommunicationExtended,
    VoiceCommunicationFilters,
};
use crate::domain::customer::{
    Customer, CustomerExtended, CustomerFilters, NewCustomer, UpdateCustomer,
};
use crate::domain::offer::{NewOffer, Offer, OfferExtended, OfferFilters, UpdateOffer};
use crate::domain::product::{
    NewProduct, Product, ProductExtended, ProductFilters, UpdateProduct,
};
use crate::domain::user::{NewUser, User, UserFilters};
use crate::repository::errors::RepositoryResult;

pub mod category;
pub mod communication;
pub mod customer;
pub mod errors;
pub mod offer;
pub mod product;
pub mod user;

#[cfg(test)]
pub mod mock;

/// Number of rows returned by a single `list_*` call unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
    page_size: usize,
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the number of rows returned per page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Number of rows returned per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }

    fn page_limit(&self) -> i64 {
        i64::try_from(self.page_size).unwrap_or(i64::MAX)
    }
}

/// Position of the last row seen by a client of a `(moment DESC, id DESC)` listing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimelineCursor {
    pub moment: NaiveDateTime,
    pub id: i32,
}

/// Build a `LIKE` pattern matching `term` anywhere, escaping wildcards with `\`.
///
/// The term is lowercased the same way as `fold_case`, so the pattern must be
/// compared against a `fold_case(column)` expression.
pub(crate) fn contains_pattern(term: &str) -> String {
    let folded = term.to_lowercase();
    let mut pattern = String::with_capacity(folded.len() + 2);
    pattern.push('%');
    for ch in folded.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Deduplicate identifiers while keeping their first-seen order.
pub(crate) fn unique_ids(ids: &[i32]) -> Vec<i32> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    unique
}

/// Read-only operations over operator records.
pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<User>;
    fn list_users(&self, cursor: Option<i32>, filters: &UserFilters) -> RepositoryResult<Vec<User>>;
}

/// Write operations over operator records.
pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}

/// Read-only operations over customer records.
pub trait CustomerReader {
    fn get_customer_by_id(&self, id: i32) -> RepositoryResult<Customer>;
    fn get_customer_extended(&self, id: i32) -> RepositoryResult<CustomerExtended>;
    fn list_customers(
        &self,
        cursor: Option<i32>,
        filters: &CustomerFilters,
    ) -> RepositoryResult<Vec<Customer>>;
    fn list_customers_extended(
        &self,
        cursor: Option<i32>,
        filters: &CustomerFilters,
    ) -> RepositoryResult<Vec<CustomerExtended>>;
    fn list_customer_emails_by_products(&self, product_ids: &[i32]) -> RepositoryResult<Vec<String>>;
}

/// Write operations over customer records.
pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    fn update_customer(&self, customer_id: i32, updates: &UpdateCustomer) -> RepositoryResult<Customer>;
    fn delete_customer(&self, customer_id: i32) -> RepositoryResult<Customer>;
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Product>;
    fn get_product_extended(&self, id: i32) -> RepositoryResult<ProductExtended>;
    fn list_products(
        &self,
        cursor: Option<i32>,
        filters: &ProductFilters,
    ) -> RepositoryResult<Vec<Product>>;
    fn list_products_extended(
        &self,
        cursor: Option<i32>,
        filters: &ProductFilters,
    ) -> RepositoryResult<Vec<ProductExtended>>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
    /// Delete a product unless an offer still references it.
    fn delete_product(&self, product_id: i32) -> RepositoryResult<Product>;
}

/// Read-only operations over category records.
pub trait CategoryReader {
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Category>;
    fn get_category_extended(&self, id: i32) -> RepositoryResult<CategoryExtended>;
    fn list_categories(
        &self,
        cursor: Option<i32>,
        filters: &CategoryFilters,
    ) -> RepositoryResult<Vec<Category>>;
}

/// Write operations over category records.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(&self, category_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
    fn delete_category(&self, category_id: i32) -> RepositoryResult<Category>;
}

/// Read-only operations over offer records.
pub trait OfferReader {
    fn get_offer_by_id(&self, id: i32) -> RepositoryResult<Offer>;
    fn get_offer_extended(&self, id: i32) -> RepositoryResult<OfferExtended>;
    fn list_offers(&self, cursor: Option<i32>, filters: &OfferFilters) -> RepositoryResult<Vec<Offer>>;
}

/// Write operations over offer records.
pub trait OfferWriter {
    fn create_offer(&self, new_offer: &NewOffer) -> RepositoryResult<Offer>;
    fn update_offer(&self, offer_id: i32, updates: &UpdateOffer) -> RepositoryResult<Offer>;
    fn delete_offer(&self, offer_id: i32) -> RepositoryResult<Offer>;
}

/// Read-only operations over chat messages.
pub trait ChatCommunicationReader {
    fn get_chat_communication_by_id(&self, id: i32) -> RepositoryResult<ChatCommunication>;
    fn get_chat_communication_extended(&self, id: i32) -> RepositoryResult<ChatCommunicationExtended>;
    fn list_chat_communications(
        &self,
        cursor: Option<i32>,
        filters: &ChatCommunicationFilters,
    ) -> RepositoryResult<Vec<ChatCommunication>>;
    fn list_chat_communications_extended(
        &self,
        cursor: Option<i32>,
        filters: &ChatCommunicationFilters,
    ) -> RepositoryResult<Vec<ChatCommunicationExtended>>;
}

/// Write operations over chat messages.
pub trait ChatCommunicationWriter {
    fn create_chat_communication(
        &self,
        new_chat: &NewChatCommunication,
    ) -> RepositoryResult<ChatCommunication>;
    fn update_chat_communication(
        &self,
        chat_id: i32,
        updates: &UpdateChatCommunication,
    ) -> RepositoryResult<ChatCommunication>;
    fn delete_chat_communication(&self, chat_id: i32) -> RepositoryResult<ChatCommunication>;
}

/// Read-only operations over voice calls.
pub trait VoiceCommunicationReader {
    fn get_voice_communication_by_id(&self, id: i32) -> RepositoryResult<VoiceCommunication>;
    fn get_voice_communication_extended(
        &self,
        id: i32,
    ) -> RepositoryResult<VoiceCommunicationExtended>;
    fn list_voice_communications(
        &self,
        cursor: Option<i32>,
        filters: &VoiceCommunicationFilters,
    ) -> RepositoryResult<Vec<VoiceCommunication>>;
    fn list_voice_communications_extended(
        &self,
        cursor: Option<i32>,
        filters: &VoiceCommunicationFilters,
    ) -> RepositoryResult<Vec<VoiceCommunicationExtended>>;
    /// Location of the recording stored for the call.
    fn get_voice_recording_path(&self, id: i32) -> RepositoryResult<String>;
}

/// Write operations over voice calls.
pub trait VoiceCommunicationWriter {
    fn create_voice_communication(
        &self,
        new_voice: &NewVoiceCommunication,
    ) -> RepositoryResult<VoiceCommunication>;
    fn update_voice_communication(
        &self,
        voice_id: i32,
        updates: &UpdateVoiceCommunication,
    ) -> RepositoryResult<VoiceCommunication>;
    fn delete_voice_communication(&self, voice_id: i32) -> RepositoryResult<VoiceCommunication>;
}

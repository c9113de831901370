use mockall::mock;

use super::{
    CategoryReader, CategoryWriter, ChatCommunicationReader, ChatCommunicationWriter,
    CustomerReader, CustomerWriter, OfferReader, OfferWriter, ProductReader, ProductWriter,
    UserReader, UserWriter, VoiceCommunicationReader, VoiceCommunicationWriter,
};
use crate::domain::{
    category::{Category, CategoryExtended, CategoryFilters, NewCategory, UpdateCategory},
    communication::{
        ChatCommunication, ChatCommunicationExtended, ChatCommunicationFilters,
        NewChatCommunication, NewVoiceCommunication, UpdateChatCommunication,
        UpdateVoiceCommunication, VoiceCommunication, VoiceCommunicationExtended,
        VoiceCommunicationFilters,
    },
    customer::{Customer, CustomerExtended, CustomerFilters, NewCustomer, UpdateCustomer},
    offer::{NewOffer, Offer, OfferExtended, OfferFilters, UpdateOffer},
    product::{NewProduct, Product, ProductExtended, ProductFilters, UpdateProduct},
    user::{NewUser, User, UserFilters},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<User>;
        fn list_users(&self, cursor: Option<i32>, filters: &UserFilters) -> RepositoryResult<Vec<User>>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    }
}

mock! {
    pub CustomerReader {}

    impl CustomerReader for CustomerReader {
        fn get_customer_by_id(&self, id: i32) -> RepositoryResult<Customer>;
        fn get_customer_extended(&self, id: i32) -> RepositoryResult<CustomerExtended>;
        fn list_customers(&self, cursor: Option<i32>, filters: &CustomerFilters) -> RepositoryResult<Vec<Customer>>;
        fn list_customers_extended(&self, cursor: Option<i32>, filters: &CustomerFilters) -> RepositoryResult<Vec<CustomerExtended>>;
        fn list_customer_emails_by_products(&self, product_ids: &[i32]) -> RepositoryResult<Vec<String>>;
    }
}

mock! {
    pub CustomerWriter {}

    impl CustomerWriter for CustomerWriter {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        fn update_customer(&self, customer_id: i32, updates: &UpdateCustomer) -> RepositoryResult<Customer>;
        fn delete_customer(&self, customer_id: i32) -> RepositoryResult<Customer>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Product>;
        fn get_product_extended(&self, id: i32) -> RepositoryResult<ProductExtended>;
        fn list_products(&self, cursor: Option<i32>, filters: &ProductFilters) -> RepositoryResult<Vec<Product>>;
        fn list_products_extended(&self, cursor: Option<i32>, filters: &ProductFilters) -> RepositoryResult<Vec<ProductExtended>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<Product>;
    }
}

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Category>;
        fn get_category_extended(&self, id: i32) -> RepositoryResult<CategoryExtended>;
        fn list_categories(&self, cursor: Option<i32>, filters: &CategoryFilters) -> RepositoryResult<Vec<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32) -> RepositoryResult<Category>;
    }
}

mock! {
    pub OfferReader {}

    impl OfferReader for OfferReader {
        fn get_offer_by_id(&self, id: i32) -> RepositoryResult<Offer>;
        fn get_offer_extended(&self, id: i32) -> RepositoryResult<OfferExtended>;
        fn list_offers(&self, cursor: Option<i32>, filters: &OfferFilters) -> RepositoryResult<Vec<Offer>>;
    }
}

mock! {
    pub OfferWriter {}

    impl OfferWriter for OfferWriter {
        fn create_offer(&self, new_offer: &NewOffer) -> RepositoryResult<Offer>;
        fn update_offer(&self, offer_id: i32, updates: &UpdateOffer) -> RepositoryResult<Offer>;
        fn delete_offer(&self, offer_id: i32) -> RepositoryResult<Offer>;
    }
}

mock! {
    pub ChatCommunicationReader {}

    impl ChatCommunicationReader for ChatCommunicationReader {
        fn get_chat_communication_by_id(&self, id: i32) -> RepositoryResult<ChatCommunication>;
        fn get_chat_communication_extended(&self, id: i32) -> RepositoryResult<ChatCommunicationExtended>;
        fn list_chat_communications(&self, cursor: Option<i32>, filters: &ChatCommunicationFilters) -> RepositoryResult<Vec<ChatCommunication>>;
        fn list_chat_communications_extended(&self, cursor: Option<i32>, filters: &ChatCommunicationFilters) -> RepositoryResult<Vec<ChatCommunicationExtended>>;
    }
}

mock! {
    pub ChatCommunicationWriter {}

    impl ChatCommunicationWriter for ChatCommunicationWriter {
        fn create_chat_communication(&self, new_chat: &NewChatCommunication) -> RepositoryResult<ChatCommunication>;
        fn update_chat_communication(&self, chat_id: i32, updates: &UpdateChatCommunication) -> RepositoryResult<ChatCommunication>;
        fn delete_chat_communication(&self, chat_id: i32) -> RepositoryResult<ChatCommunication>;
    }
}

mock! {
    pub VoiceCommunicationReader {}

    impl VoiceCommunicationReader for VoiceCommunicationReader {
        fn get_voice_communication_by_id(&self, id: i32) -> RepositoryResult<VoiceCommunication>;
        fn get_voice_communication_extended(&self, id: i32) -> RepositoryResult<VoiceCommunicationExtended>;
        fn list_voice_communications(&self, cursor: Option<i32>, filters: &VoiceCommunicationFilters) -> RepositoryResult<Vec<VoiceCommunication>>;
        fn list_voice_communications_extended(&self, cursor: Option<i32>, filters: &VoiceCommunicationFilters) -> RepositoryResult<Vec<VoiceCommunicationExtended>>;
        fn get_voice_recording_path(&self, id: i32) -> RepositoryResult<String>;
    }
}

mock! {
    pub VoiceCommunicationWriter {}

    impl VoiceCommunicationWriter for VoiceCommunicationWriter {
        fn create_voice_communication(&self, new_voice: &NewVoiceCommunication) -> RepositoryResult<VoiceCommunication>;
        fn update_voice_communication(&self, voice_id: i32, updates: &UpdateVoiceCommunication) -> RepositoryResult<VoiceCommunication>;
        fn delete_voice_communication(&self, voice_id: i32) -> RepositoryResult<VoiceCommunication>;
    }
}

use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::{CustomerFilters, NewCustomer, UpdateCustomer};
use crate::forms::{
    FormResult, NAME_MAX_LEN, PHONE_MAX_LEN, empty_string_as_none, positive_ids, required_inline,
    search_term,
};

/// JSON body accepted when creating a customer.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCustomerForm {
    #[validate(email, length(max = NAME_MAX_LEN))]
    pub email: String,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub surname: String,
    #[validate(length(min = 1, max = PHONE_MAX_LEN))]
    pub phone_number: String,
    /// Products owned by the customer.
    #[serde(default)]
    pub product_ids: Vec<i32>,
}

impl AddCustomerForm {
    /// Validates and sanitizes the payload into a domain `NewCustomer`.
    pub fn into_new_customer(self) -> FormResult<NewCustomer> {
        self.validate()?;

        let email = required_inline(&self.email, "email")?;
        let name = required_inline(&self.name, "name")?;
        let surname = required_inline(&self.surname, "surname")?;
        let phone_number = required_inline(&self.phone_number, "phone number")?;
        let product_ids = positive_ids(self.product_ids, "product id")?;

        Ok(NewCustomer::new(email, name, surname, phone_number).with_product_ids(product_ids))
    }
}

/// JSON body accepted when patching a customer. Absent fields stay untouched.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditCustomerForm {
    #[validate(email, length(max = NAME_MAX_LEN))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub surname: Option<String>,
    #[validate(length(min = 1, max = PHONE_MAX_LEN))]
    pub phone_number: Option<String>,
    /// Replacement product set; an empty list disconnects every product.
    pub product_ids: Option<Vec<i32>>,
}

impl EditCustomerForm {
    /// Validates and sanitizes the payload into a domain `UpdateCustomer`.
    pub fn into_update_customer(self) -> FormResult<UpdateCustomer> {
        self.validate()?;

        let mut update = UpdateCustomer::new();
        if let Some(email) = self.email {
            update = update.email(required_inline(&email, "email")?);
        }
        if let Some(name) = self.name {
            update = update.name(required_inline(&name, "name")?);
        }
        if let Some(surname) = self.surname {
            update = update.surname(required_inline(&surname, "surname")?);
        }
        if let Some(phone_number) = self.phone_number {
            update = update.phone_number(required_inline(&phone_number, "phone number")?);
        }
        if let Some(product_ids) = self.product_ids {
            update = update.product_ids(positive_ids(product_ids, "product id")?);
        }

        Ok(update)
    }
}

/// Query string accepted by the customer listings.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListQuery {
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub cursor: Option<i32>,
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i32>,
    #[validate(length(max = NAME_MAX_LEN))]
    pub name: Option<String>,
    #[validate(length(max = NAME_MAX_LEN))]
    pub surname: Option<String>,
    #[validate(length(max = NAME_MAX_LEN))]
    pub email: Option<String>,
    #[validate(length(max = PHONE_MAX_LEN))]
    pub phone_number: Option<String>,
}

impl CustomerListQuery {
    /// Split the query into the page cursor and listing filters.
    pub fn into_parts(self) -> FormResult<(Option<i32>, CustomerFilters)> {
        self.validate()?;

        let filters = CustomerFilters {
            id: self.id,
            name: search_term(self.name),
            surname: search_term(self.surname),
            email: search_term(self.email),
            phone_number: search_term(self.phone_number),
        };

        Ok((self.cursor, filters))
    }
}

/// Query string accepted by the customer e-mail lookup.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerEmailsQuery {
    #[serde(default)]
    pub product_ids: Vec<i32>,
}

impl CustomerEmailsQuery {
    pub fn into_product_ids(self) -> FormResult<Vec<i32>> {
        positive_ids(self.product_ids, "product id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormError;

    fn add_form() -> AddCustomerForm {
        AddCustomerForm {
            email: "A@X.com".to_string(),
            name: "  Ann  ".to_string(),
            surname: "Lee".to_string(),
            phone_number: "123".to_string(),
            product_ids: vec![2, 5],
        }
    }

    #[test]
    fn add_customer_form_sanitizes_and_converts() {
        let new_customer = add_form()
            .into_new_customer()
            .expect("expected conversion to succeed");

        assert_eq!(new_customer.email, "a@x.com");
        assert_eq!(new_customer.name, "Ann");
        assert_eq!(new_customer.product_ids, vec![2, 5]);
    }

    #[test]
    fn add_customer_form_rejects_invalid_email() {
        let form = AddCustomerForm {
            email: "not-an-email".to_string(),
            ..add_form()
        };

        assert!(matches!(
            form.into_new_customer(),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn add_customer_form_rejects_long_phone_number() {
        let form = AddCustomerForm {
            phone_number: "1".repeat(33),
            ..add_form()
        };

        assert!(matches!(
            form.into_new_customer(),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn add_customer_form_rejects_blank_name() {
        let form = AddCustomerForm {
            name: "   ".to_string(),
            ..add_form()
        };

        assert!(matches!(
            form.into_new_customer(),
            Err(FormError::EmptyField("name"))
        ));
    }

    #[test]
    fn edit_customer_form_keeps_absent_fields_unset() {
        let form = EditCustomerForm {
            name: Some("A2".to_string()),
            ..EditCustomerForm::default()
        };

        let update = form
            .into_update_customer()
            .expect("expected conversion to succeed");

        assert_eq!(update.name.as_deref(), Some("A2"));
        assert!(update.surname.is_none());
        assert!(update.email.is_none());
        assert!(update.product_ids.is_none());
    }

    #[test]
    fn edit_customer_form_accepts_empty_product_set() {
        let form = EditCustomerForm {
            product_ids: Some(Vec::new()),
            ..EditCustomerForm::default()
        };

        let update = form
            .into_update_customer()
            .expect("expected conversion to succeed");

        assert_eq!(update.product_ids, Some(Vec::new()));
    }

    #[test]
    fn list_query_parses_filters_from_query_string() {
        let query: CustomerListQuery =
            serde_qs::from_str("cursor=4&name=%20an%20&email=").expect("query parses");

        let (cursor, filters) = query.into_parts().expect("query is valid");

        assert_eq!(cursor, Some(4));
        assert_eq!(filters.name.as_deref(), Some("an"));
        assert!(filters.email.is_none());
    }

    #[test]
    fn list_query_rejects_non_positive_cursor() {
        let query = CustomerListQuery {
            cursor: Some(0),
            ..CustomerListQuery::default()
        };

        assert!(matches!(query.into_parts(), Err(FormError::Validation(_))));
    }

    #[test]
    fn emails_query_reads_indexed_product_ids() {
        let config = serde_qs::Config::new(5, false);
        let query: CustomerEmailsQuery = config
            .deserialize_str("productIds[0]=1&productIds[1]=3")
            .expect("query parses");

        assert_eq!(query.into_product_ids().expect("ids are valid"), vec![1, 3]);
    }
}

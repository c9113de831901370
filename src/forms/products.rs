use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{NewProduct, ProductFilters, UpdateProduct};
use crate::forms::{
    DESCRIPTION_MAX_LEN, FormResult, NAME_MAX_LEN, empty_string_as_none, positive_ids,
    required_inline, required_multiline, search_term,
};

/// JSON body accepted when creating a product.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(length(min = 1, max = DESCRIPTION_MAX_LEN))]
    pub description: String,
    /// Price in the smallest currency unit.
    #[validate(range(min = 0))]
    pub price_cents: i64,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    #[serde(rename = "type")]
    pub product_type: String,
    #[serde(default)]
    pub category_ids: Vec<i32>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> FormResult<NewProduct> {
        self.validate()?;

        let name = required_inline(&self.name, "name")?;
        let description = required_multiline(&self.description, "description")?;
        let product_type = required_inline(&self.product_type, "type")?;
        let category_ids = positive_ids(self.category_ids, "category id")?;

        Ok(
            NewProduct::new(name, description, self.price_cents, product_type)
                .with_category_ids(category_ids),
        )
    }
}

/// JSON body accepted when patching a product.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = DESCRIPTION_MAX_LEN))]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    /// Replacement category set; an empty list clears every category.
    pub category_ids: Option<Vec<i32>>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> FormResult<UpdateProduct> {
        self.validate()?;

        let mut update = UpdateProduct::new();
        if let Some(name) = self.name {
            update = update.name(required_inline(&name, "name")?);
        }
        if let Some(description) = self.description {
            update = update.description(required_multiline(&description, "description")?);
        }
        if let Some(price_cents) = self.price_cents {
            update = update.price_cents(price_cents);
        }
        if let Some(product_type) = self.product_type {
            update = update.product_type(required_inline(&product_type, "type")?);
        }
        if let Some(category_ids) = self.category_ids {
            update = update.category_ids(positive_ids(category_ids, "category id")?);
        }

        Ok(update)
    }
}

/// Query string accepted by the product listings.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub cursor: Option<i32>,
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i32>,
    #[validate(length(max = NAME_MAX_LEN))]
    pub name: Option<String>,
    #[validate(length(max = DESCRIPTION_MAX_LEN))]
    pub description: Option<String>,
    /// Exact product type.
    #[validate(length(max = NAME_MAX_LEN))]
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_price_cents: Option<i64>,
    #[validate(range(min = 0))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_price_cents: Option<i64>,
    /// Products assigned to any of these categories.
    pub category_ids: Option<Vec<i32>>,
}

impl ProductListQuery {
    /// Split the query into the page cursor and listing filters.
    pub fn into_parts(self) -> FormResult<(Option<i32>, ProductFilters)> {
        self.validate()?;

        let category_ids = self
            .category_ids
            .map(|ids| positive_ids(ids, "category id"))
            .transpose()?;

        let filters = ProductFilters {
            id: self.id,
            name: search_term(self.name),
            description: search_term(self.description),
            product_type: search_term(self.product_type),
            min_price_cents: self.min_price_cents,
            max_price_cents: self.max_price_cents,
            category_ids,
        };

        Ok((self.cursor, filters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormError;

    fn add_form() -> AddProductForm {
        AddProductForm {
            name: " Router ".to_string(),
            description: " Dual band\n\n\n Wi-Fi 6 ".to_string(),
            price_cents: 12_900,
            product_type: "hardware".to_string(),
            category_ids: vec![1],
        }
    }

    #[test]
    fn add_product_form_sanitizes_and_converts() {
        let product = add_form()
            .into_new_product()
            .expect("expected conversion to succeed");

        assert_eq!(product.name, "Router");
        assert_eq!(product.description, "Dual band\n\nWi-Fi 6");
        assert_eq!(product.price_cents, 12_900);
        assert_eq!(product.category_ids, vec![1]);
    }

    #[test]
    fn add_product_form_rejects_negative_price() {
        let form = AddProductForm {
            price_cents: -1,
            ..add_form()
        };

        assert!(matches!(
            form.into_new_product(),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn add_product_form_reads_type_field_from_json() {
        let form: AddProductForm = serde_json::from_str(
            r#"{"name":"Modem","description":"ADSL","priceCents":500,"type":"hardware"}"#,
        )
        .expect("body parses");

        assert_eq!(form.product_type, "hardware");
        assert!(form.category_ids.is_empty());
    }

    #[test]
    fn add_product_form_rejects_oversized_description() {
        let form = AddProductForm {
            description: "x".repeat(1021),
            ..add_form()
        };

        assert!(matches!(
            form.into_new_product(),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn edit_product_form_only_sets_supplied_fields() {
        let form = EditProductForm {
            price_cents: Some(0),
            ..EditProductForm::default()
        };

        let update = form
            .into_update_product()
            .expect("expected conversion to succeed");

        assert_eq!(update.price_cents, Some(0));
        assert!(update.name.is_none());
        assert!(update.category_ids.is_none());
    }

    #[test]
    fn list_query_reads_price_range_and_categories() {
        let config = serde_qs::Config::new(5, false);
        let query: ProductListQuery = config
            .deserialize_str("minPriceCents=100&maxPriceCents=&categoryIds[0]=2&type=service")
            .expect("query parses");

        let (cursor, filters) = query.into_parts().expect("query is valid");

        assert!(cursor.is_none());
        assert_eq!(filters.min_price_cents, Some(100));
        assert!(filters.max_price_cents.is_none());
        assert_eq!(filters.category_ids, Some(vec![2]));
        assert_eq!(filters.product_type.as_deref(), Some("service"));
    }
}

use serde::Deserialize;
use validator::Validate;

use crate::domain::offer::{NewOffer, NewOfferProduct, OfferFilters, UpdateOffer};
use crate::forms::{
    DESCRIPTION_MAX_LEN, FormResult, NAME_MAX_LEN, empty_string_as_none, positive_ids,
    required_inline, required_multiline, search_term,
};

/// Single line item of an offer body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OfferLineForm {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
    /// Offer price per unit in the smallest currency unit.
    #[validate(range(min = 0))]
    pub new_price_cents: i64,
}

impl From<OfferLineForm> for NewOfferProduct {
    fn from(line: OfferLineForm) -> Self {
        NewOfferProduct::new(line.product_id, line.quantity, line.new_price_cents)
    }
}

/// JSON body accepted when creating an offer.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddOfferForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(length(min = 1, max = DESCRIPTION_MAX_LEN))]
    pub description: String,
    #[validate(nested)]
    #[serde(default)]
    pub offer_products: Vec<OfferLineForm>,
}

impl AddOfferForm {
    /// Validates and sanitizes the payload into a domain `NewOffer`.
    pub fn into_new_offer(self) -> FormResult<NewOffer> {
        self.validate()?;

        let name = required_inline(&self.name, "name")?;
        let description = required_multiline(&self.description, "description")?;
        let lines: Vec<NewOfferProduct> =
            self.offer_products.into_iter().map(Into::into).collect();

        Ok(NewOffer::new(name, description).with_products(lines))
    }
}

/// JSON body accepted when patching an offer.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditOfferForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = DESCRIPTION_MAX_LEN))]
    pub description: Option<String>,
    /// Replacement line items; an empty list empties the offer.
    pub offer_products: Option<Vec<OfferLineForm>>,
}

impl EditOfferForm {
    /// Validates and sanitizes the payload into a domain `UpdateOffer`.
    pub fn into_update_offer(self) -> FormResult<UpdateOffer> {
        self.validate()?;

        let mut update = UpdateOffer::new();
        if let Some(name) = self.name {
            update = update.name(required_inline(&name, "name")?);
        }
        if let Some(description) = self.description {
            update = update.description(required_multiline(&description, "description")?);
        }
        if let Some(lines) = self.offer_products {
            for line in &lines {
                line.validate()?;
            }
            let lines: Vec<NewOfferProduct> = lines.into_iter().map(Into::into).collect();
            update = update.offer_products(lines);
        }

        Ok(update)
    }
}

/// Query string accepted by the offer listing.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OfferListQuery {
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
    /// Offers containing any of these products.
    pub product_ids: Option<Vec<i32>>,
}

impl OfferListQuery {
    /// Split the query into the page cursor and listing filters.
    pub fn into_parts(self) -> FormResult<(Option<i32>, OfferFilters)> {
        self.validate()?;

        let product_ids = self
            .product_ids
            .map(|ids| positive_ids(ids, "product id"))
            .transpose()?;

        let filters = OfferFilters {
            id: self.id,
            name: search_term(self.name),
            description: search_term(self.description),
            product_ids,
        };

        Ok((self.cursor, filters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormError;

    fn line(product_id: i32, quantity: i32) -> OfferLineForm {
        OfferLineForm {
            product_id,
            quantity,
            new_price_cents: 900,
        }
    }

    #[test]
    fn add_offer_form_converts_line_items_in_order() {
        let form = AddOfferForm {
            name: "Spring bundle".to_string(),
            description: "Router and setup".to_string(),
            offer_products: vec![line(4, 1), line(2, 3)],
        };

        let offer = form.into_new_offer().expect("expected conversion to succeed");

        assert_eq!(
            offer.offer_products,
            vec![NewOfferProduct::new(4, 1, 900), NewOfferProduct::new(2, 3, 900)]
        );
    }

    #[test]
    fn add_offer_form_rejects_zero_quantity() {
        let form = AddOfferForm {
            name: "Bundle".to_string(),
            description: "Desc".to_string(),
            offer_products: vec![line(1, 0)],
        };

        assert!(matches!(form.into_new_offer(), Err(FormError::Validation(_))));
    }

    #[test]
    fn edit_offer_form_validates_replacement_lines() {
        let form = EditOfferForm {
            offer_products: Some(vec![line(0, 1)]),
            ..EditOfferForm::default()
        };

        assert!(matches!(
            form.into_update_offer(),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn edit_offer_form_with_empty_lines_clears_the_offer() {
        let form = EditOfferForm {
            offer_products: Some(Vec::new()),
            ..EditOfferForm::default()
        };

        let update = form.into_update_offer().expect("expected conversion to succeed");

        assert_eq!(update.offer_products, Some(Vec::new()));
        assert!(update.name.is_none());
    }
}

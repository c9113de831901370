use serde::Deserialize;
use validator::Validate;

use crate::domain::category::{CategoryFilters, NewCategory, UpdateCategory};
use crate::forms::{FormResult, NAME_MAX_LEN, empty_string_as_none, required_inline, search_term};

/// JSON body accepted when creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> FormResult<NewCategory> {
        self.validate()?;

        Ok(NewCategory::new(required_inline(&self.name, "name")?))
    }
}

/// JSON body accepted when patching a category.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditCategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
}

impl EditCategoryForm {
    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self) -> FormResult<UpdateCategory> {
        self.validate()?;

        let name = self
            .name
            .map(|name| required_inline(&name, "name"))
            .transpose()?;

        Ok(UpdateCategory::new(name))
    }
}

/// Query string accepted by the category listing.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CategoryListQuery {
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub cursor: Option<i32>,
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i32>,
    #[validate(length(max = NAME_MAX_LEN))]
    pub name: Option<String>,
}

impl CategoryListQuery {
    /// Split the query into the page cursor and listing filters.
    pub fn into_parts(self) -> FormResult<(Option<i32>, CategoryFilters)> {
        self.validate()?;

        let filters = CategoryFilters {
            id: self.id,
            name: search_term(self.name),
        };

        Ok((self.cursor, filters))
    }
}

use serde::Deserialize;
use validator::Validate;

use crate::domain::user::{NewUser, UserFilters};
use crate::forms::{FormResult, NAME_MAX_LEN, empty_string_as_none, required_inline, search_term};

/// JSON body accepted when registering an operator.
#[derive(Debug, Deserialize, Validate)]
pub struct AddUserForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub surname: String,
    #[validate(email, length(max = NAME_MAX_LEN))]
    pub email: String,
}

impl AddUserForm {
    pub fn into_new_user(self) -> FormResult<NewUser> {
        self.validate()?;

        Ok(NewUser::new(
            required_inline(&self.name, "name")?,
            required_inline(&self.surname, "surname")?,
            required_inline(&self.email, "email")?,
        ))
    }
}

/// Query string accepted by the operator listing.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UserListQuery {
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub cursor: Option<i32>,
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i32>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
}

impl UserListQuery {
    pub fn into_parts(self) -> FormResult<(Option<i32>, UserFilters)> {
        self.validate()?;

        let filters = UserFilters {
            id: self.id,
            name: search_term(self.name),
            surname: search_term(self.surname),
            email: search_term(self.email),
        };

        Ok((self.cursor, filters))
    }
}

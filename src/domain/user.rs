use serde::{Deserialize, Serialize};

/// Support operator taking part in customer communications.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub email: String,
}

impl NewUser {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            email: email.into().to_lowercase(),
        }
    }
}

/// Optional constraints applied when listing users.
#[derive(Clone, Debug, Default)]
pub struct UserFilters {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
}

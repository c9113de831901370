use crate::domain::user::User;
use crate::forms::users::{AddUserForm, UserListQuery};
use crate::repository::{UserReader, UserWriter};
use crate::services::ServiceResult;

pub fn list_users<R>(repo: &R, query: UserListQuery) -> ServiceResult<Vec<User>>
where
    R: UserReader + ?Sized,
{
    let (cursor, filters) = query.into_parts()?;
    Ok(repo.list_users(cursor, &filters)?)
}

pub fn get_user<R>(repo: &R, user_id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    Ok(repo.get_user_by_id(user_id)?)
}

/// Registers an operator who can own communications.
pub fn create_user<R>(repo: &R, form: AddUserForm) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let new_user = form.into_new_user()?;
    Ok(repo.create_user(&new_user)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::{MockUserReader, MockUserWriter};

    #[test]
    fn create_user_stores_lowercased_email() {
        let mut repo = MockUserWriter::new();
        repo.expect_create_user()
            .withf(|new_user| new_user.email == "ann@desk.test")
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: 1,
                    name: new_user.name.clone(),
                    surname: new_user.surname.clone(),
                    email: new_user.email.clone(),
                })
            });

        let form = AddUserForm {
            name: "Ann".to_string(),
            surname: "Operator".to_string(),
            email: "ANN@desk.test".to_string(),
        };

        let user = create_user(&repo, form).expect("user is created");
        assert_eq!(user.id, 1);
    }

    #[test]
    fn list_users_returns_repository_page() {
        let mut repo = MockUserReader::new();
        repo.expect_list_users()
            .returning(|_, _| Ok(vec![User::default()]));

        let users = list_users(&repo, UserListQuery::default()).expect("page loads");
        assert_eq!(users.len(), 1);
    }
}

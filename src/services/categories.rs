use crate::domain::category::{Category, CategoryExtended};
use crate::forms::categories::{AddCategoryForm, CategoryListQuery, EditCategoryForm};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::ServiceResult;

/// Returns one page of categories.
pub fn list_categories<R>(repo: &R, query: CategoryListQuery) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader + ?Sized,
{
    let (cursor, filters) = query.into_parts()?;
    Ok(repo.list_categories(cursor, &filters)?)
}

pub fn get_category<R>(repo: &R, category_id: i32) -> ServiceResult<Category>
where
    R: CategoryReader + ?Sized,
{
    Ok(repo.get_category_by_id(category_id)?)
}

/// Category with every product assigned to it.
pub fn get_category_extended<R>(repo: &R, category_id: i32) -> ServiceResult<CategoryExtended>
where
    R: CategoryReader + ?Sized,
{
    Ok(repo.get_category_extended(category_id)?)
}

pub fn create_category<R>(repo: &R, form: AddCategoryForm) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let new_category = form.into_new_category()?;
    Ok(repo.create_category(&new_category)?)
}

pub fn update_category<R>(
    repo: &R,
    category_id: i32,
    form: EditCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let updates = form.into_update_category()?;
    Ok(repo.update_category(category_id, &updates)?)
}

pub fn delete_category<R>(repo: &R, category_id: i32) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    Ok(repo.delete_category(category_id)?)
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::{MockCategoryReader, MockCategoryWriter};
    use crate::services::ServiceError;

    #[test]
    fn create_category_sanitizes_name() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_create_category()
            .withf(|new_category| new_category.name == "Fresh Produce")
            .times(1)
            .returning(|new_category| {
                Ok(Category {
                    id: 1,
                    name: new_category.name.clone(),
                })
            });

        let form = AddCategoryForm {
            name: " Fresh  Produce ".to_string(),
        };

        let category = create_category(&repo, form).expect("category is created");
        assert_eq!(category.name, "Fresh Produce");
    }

    #[test]
    fn duplicate_name_is_a_conflict() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_create_category()
            .returning(|_| Err(RepositoryError::Conflict("UNIQUE constraint failed".into())));

        let form = AddCategoryForm {
            name: "Pantry".to_string(),
        };

        assert!(matches!(
            create_category(&repo, form),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn deleting_missing_category_is_not_found() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_delete_category()
            .with(eq(42))
            .returning(|_| Err(RepositoryError::NotFound));

        assert_eq!(delete_category(&repo, 42), Err(ServiceError::NotFound));
    }

    #[test]
    fn extended_category_is_returned_as_is() {
        let mut repo = MockCategoryReader::new();
        repo.expect_get_category_extended()
            .with(eq(1))
            .returning(|id| {
                Ok(CategoryExtended {
                    id,
                    name: "Pantry".to_string(),
                    products: Vec::new(),
                })
            });

        let category = get_category_extended(&repo, 1).expect("category loads");
        assert!(category.products.is_empty());
    }
}

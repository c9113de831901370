use crate::domain::product::{Product, ProductExtended};
use crate::forms::products::{AddProductForm, EditProductForm, ProductListQuery};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::ServiceResult;

/// Returns one page of products.
pub fn list_products<R>(repo: &R, query: ProductListQuery) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let (cursor, filters) = query.into_parts()?;
    Ok(repo.list_products(cursor, &filters)?)
}

/// Returns one page of products with their categories.
pub fn list_products_extended<R>(
    repo: &R,
    query: ProductListQuery,
) -> ServiceResult<Vec<ProductExtended>>
where
    R: ProductReader + ?Sized,
{
    let (cursor, filters) = query.into_parts()?;
    Ok(repo.list_products_extended(cursor, &filters)?)
}

pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    Ok(repo.get_product_by_id(product_id)?)
}

pub fn get_product_extended<R>(repo: &R, product_id: i32) -> ServiceResult<ProductExtended>
where
    R: ProductReader + ?Sized,
{
    Ok(repo.get_product_extended(product_id)?)
}

pub fn create_product<R>(repo: &R, form: AddProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let new_product = form.into_new_product()?;
    Ok(repo.create_product(&new_product)?)
}

pub fn update_product<R>(repo: &R, product_id: i32, form: EditProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let updates = form.into_update_product()?;
    Ok(repo.update_product(product_id, &updates)?)
}

/// Deletes a product; fails with `Conflict` while an offer still lists it.
pub fn delete_product<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    Ok(repo.delete_product(product_id)?)
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::{MockProductReader, MockProductWriter};
    use crate::services::ServiceError;

    fn product() -> Product {
        Product {
            id: 3,
            name: "Router".to_string(),
            description: "Dual band".to_string(),
            price_cents: 12_900,
            product_type: "hardware".to_string(),
        }
    }

    #[test]
    fn create_product_forwards_categories() {
        let mut repo = MockProductWriter::new();
        repo.expect_create_product()
            .withf(|new_product| new_product.category_ids == vec![1, 2])
            .times(1)
            .returning(|_| Ok(product()));

        let form = AddProductForm {
            name: "Router".to_string(),
            description: "Dual band".to_string(),
            price_cents: 12_900,
            product_type: "hardware".to_string(),
            category_ids: vec![1, 2],
        };

        assert_eq!(create_product(&repo, form), Ok(product()));
    }

    #[test]
    fn referenced_product_cannot_be_deleted() {
        let mut repo = MockProductWriter::new();
        repo.expect_delete_product()
            .with(eq(3))
            .times(1)
            .returning(|id| {
                Err(RepositoryError::Conflict(format!(
                    "product {id} is used by at least one offer"
                )))
            });

        assert_eq!(
            delete_product(&repo, 3),
            Err(ServiceError::Conflict(
                "product 3 is used by at least one offer".into()
            ))
        );
    }

    #[test]
    fn list_products_passes_price_range() {
        let mut repo = MockProductReader::new();
        repo.expect_list_products()
            .withf(|cursor, filters| {
                cursor.is_none()
                    && filters.min_price_cents == Some(100)
                    && filters.max_price_cents == Some(200)
            })
            .times(1)
            .returning(|_, _| Ok(vec![product()]));

        let query = ProductListQuery {
            min_price_cents: Some(100),
            max_price_cents: Some(200),
            ..ProductListQuery::default()
        };

        assert_eq!(list_products(&repo, query), Ok(vec![product()]));
    }

    #[test]
    fn database_failure_is_internal() {
        let mut repo = MockProductReader::new();
        repo.expect_get_product_extended()
            .returning(|_| Err(RepositoryError::Unknown("disk I/O error".into())));

        assert!(matches!(
            get_product_extended(&repo, 1),
            Err(ServiceError::Internal(_))
        ));
    }
}

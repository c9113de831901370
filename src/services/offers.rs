use crate::domain::offer::{Offer, OfferExtended};
use crate::forms::offers::{AddOfferForm, EditOfferForm, OfferListQuery};
use crate::repository::{OfferReader, OfferWriter};
use crate::services::ServiceResult;

/// Returns one page of offers.
pub fn list_offers<R>(repo: &R, query: OfferListQuery) -> ServiceResult<Vec<Offer>>
where
    R: OfferReader + ?Sized,
{
    let (cursor, filters) = query.into_parts()?;
    Ok(repo.list_offers(cursor, &filters)?)
}

pub fn get_offer<R>(repo: &R, offer_id: i32) -> ServiceResult<Offer>
where
    R: OfferReader + ?Sized,
{
    Ok(repo.get_offer_by_id(offer_id)?)
}

/// Offer with its line items and the products they reference.
pub fn get_offer_extended<R>(repo: &R, offer_id: i32) -> ServiceResult<OfferExtended>
where
    R: OfferReader + ?Sized,
{
    Ok(repo.get_offer_extended(offer_id)?)
}

pub fn create_offer<R>(repo: &R, form: AddOfferForm) -> ServiceResult<Offer>
where
    R: OfferWriter + ?Sized,
{
    let new_offer = form.into_new_offer()?;
    Ok(repo.create_offer(&new_offer)?)
}

pub fn update_offer<R>(repo: &R, offer_id: i32, form: EditOfferForm) -> ServiceResult<Offer>
where
    R: OfferWriter + ?Sized,
{
    let updates = form.into_update_offer()?;
    Ok(repo.update_offer(offer_id, &updates)?)
}

pub fn delete_offer<R>(repo: &R, offer_id: i32) -> ServiceResult<Offer>
where
    R: OfferWriter + ?Sized,
{
    Ok(repo.delete_offer(offer_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::offer::NewOfferProduct;
    use crate::forms::offers::OfferLineForm;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::{MockOfferReader, MockOfferWriter};
    use crate::services::ServiceError;

    fn offer() -> Offer {
        Offer {
            id: 1,
            name: "Bundle".to_string(),
            description: "Router and setup".to_string(),
        }
    }

    #[test]
    fn create_offer_forwards_line_items() {
        let mut repo = MockOfferWriter::new();
        repo.expect_create_offer()
            .withf(|new_offer| new_offer.offer_products == vec![NewOfferProduct::new(7, 2, 500)])
            .times(1)
            .returning(|_| Ok(offer()));

        let form = AddOfferForm {
            name: "Bundle".to_string(),
            description: "Router and setup".to_string(),
            offer_products: vec![OfferLineForm {
                product_id: 7,
                quantity: 2,
                new_price_cents: 500,
            }],
        };

        assert_eq!(create_offer(&repo, form), Ok(offer()));
    }

    #[test]
    fn unknown_product_in_line_is_not_found() {
        let mut repo = MockOfferWriter::new();
        repo.expect_create_offer()
            .returning(|_| Err(RepositoryError::NotFound));

        let form = AddOfferForm {
            name: "Bundle".to_string(),
            description: "Desc".to_string(),
            offer_products: vec![OfferLineForm {
                product_id: 99,
                quantity: 1,
                new_price_cents: 0,
            }],
        };

        assert_eq!(create_offer(&repo, form), Err(ServiceError::NotFound));
    }

    #[test]
    fn list_offers_filters_by_products() {
        let mut repo = MockOfferReader::new();
        repo.expect_list_offers()
            .withf(|_, filters| filters.product_ids == Some(vec![7]))
            .times(1)
            .returning(|_, _| Ok(vec![offer()]));

        let query = OfferListQuery {
            product_ids: Some(vec![7]),
            ..OfferListQuery::default()
        };

        assert_eq!(list_offers(&repo, query), Ok(vec![offer()]));
    }
}

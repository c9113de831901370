use crate::domain::customer::{Customer, CustomerExtended};
use crate::forms::customers::{
    AddCustomerForm, CustomerEmailsQuery, CustomerListQuery, EditCustomerForm,
};
use crate::repository::{CustomerReader, CustomerWriter};
use crate::services::ServiceResult;

/// Returns one page of customers.
pub fn list_customers<R>(repo: &R, query: CustomerListQuery) -> ServiceResult<Vec<Customer>>
where
    R: CustomerReader + ?Sized,
{
    let (cursor, filters) = query.into_parts()?;
    Ok(repo.list_customers(cursor, &filters)?)
}

/// Returns one page of customers with their products and communications.
pub fn list_customers_extended<R>(
    repo: &R,
    query: CustomerListQuery,
) -> ServiceResult<Vec<CustomerExtended>>
where
    R: CustomerReader + ?Sized,
{
    let (cursor, filters) = query.into_parts()?;
    Ok(repo.list_customers_extended(cursor, &filters)?)
}

pub fn get_customer<R>(repo: &R, customer_id: i32) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    Ok(repo.get_customer_by_id(customer_id)?)
}

pub fn get_customer_extended<R>(repo: &R, customer_id: i32) -> ServiceResult<CustomerExtended>
where
    R: CustomerReader + ?Sized,
{
    Ok(repo.get_customer_extended(customer_id)?)
}

/// E-mail addresses of customers owning any of the requested products.
pub fn list_customer_emails<R>(repo: &R, query: CustomerEmailsQuery) -> ServiceResult<Vec<String>>
where
    R: CustomerReader + ?Sized,
{
    let product_ids = query.into_product_ids()?;
    Ok(repo.list_customer_emails_by_products(&product_ids)?)
}

pub fn create_customer<R>(repo: &R, form: AddCustomerForm) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let new_customer = form.into_new_customer()?;
    Ok(repo.create_customer(&new_customer)?)
}

pub fn update_customer<R>(
    repo: &R,
    customer_id: i32,
    form: EditCustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let updates = form.into_update_customer()?;
    Ok(repo.update_customer(customer_id, &updates)?)
}

pub fn delete_customer<R>(repo: &R, customer_id: i32) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    Ok(repo.delete_customer(customer_id)?)
}

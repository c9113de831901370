pub mod category;
pub mod communication;
pub mod customer;
pub mod offer;
pub mod product;
pub mod user;

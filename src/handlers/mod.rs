pub mod expense;
pub mod product;
pub mod sale;
pub mod user;

pub mod jwt;
pub mod reset;

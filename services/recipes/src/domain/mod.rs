pub mod image;
pub mod repository;
pub mod representation;
pub mod shopping_list;
pub mod types;
pub mod validation;

pub mod ingredient;
pub mod recipe;
pub mod recipe_list;
pub mod shopping_cart;
pub mod tag;

//! sea-orm entities for the recipes service tables.

pub mod favorites;
pub mod ingredient_amounts;
pub mod ingredients;
pub mod recipe_tags;
pub mod recipes;
pub mod shopping_carts;
pub mod tags;
pub mod users;

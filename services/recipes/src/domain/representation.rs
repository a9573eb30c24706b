//! Wire-level projections of domain values.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::{Author, Ingredient, IngredientAmount, Recipe, RecipeFlags, Tag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagView {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl From<Tag> for TagView {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            color: tag.color,
            slug: tag.slug,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientView {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientView {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

/// Ingredient line of a recipe; `id` is the ingredient id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientAmountView {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<IngredientAmount> for IngredientAmountView {
    fn from(line: IngredientAmount) -> Self {
        Self {
            id: line.ingredient.id,
            name: line.ingredient.name,
            measurement_unit: line.ingredient.measurement_unit,
            amount: line.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorView {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<Author> for AuthorView {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            email: author.email,
            username: author.username,
            first_name: author.first_name,
            last_name: author.last_name,
        }
    }
}

/// Full recipe as returned by reads and by create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeView {
    pub id: i32,
    pub tags: Vec<TagView>,
    pub author: AuthorView,
    pub ingredients: Vec<IngredientAmountView>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl RecipeView {
    pub fn new(recipe: Recipe, flags: RecipeFlags) -> Self {
        Self {
            id: recipe.id,
            tags: recipe.tags.into_iter().map(TagView::from).collect(),
            author: recipe.author.into(),
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(IngredientAmountView::from)
                .collect(),
            is_favorited: flags.is_favorited,
            is_in_shopping_cart: flags.is_in_shopping_cart,
            name: recipe.name,
            image: recipe.image,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Compact recipe used by favorite and shopping-cart responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortRecipeView {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<Recipe> for ShortRecipeView {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            image: recipe.image,
            cooking_time: recipe.cooking_time,
        }
    }
}

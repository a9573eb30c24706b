use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Recipe tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// Catalog ingredient with its measurement unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// An ingredient used in a recipe at a given quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// Recipe author as projected from the users table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// A recipe with its tag and ingredient associations resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub author: Author,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
    /// In submission order.
    pub tags: Vec<Tag>,
    pub ingredients: Vec<IngredientAmount>,
    pub created_at: DateTime<Utc>,
}

/// `(ingredient id, amount)` pair submitted with a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientLine {
    pub ingredient_id: i32,
    pub amount: i32,
}

/// Full replacement of a recipe's tag and ingredient associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeAssociations {
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<IngredientLine>,
}

/// Validated data for a new recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub author_id: Uuid,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
    pub associations: RecipeAssociations,
    pub created_at: DateTime<Utc>,
}

/// Validated replacement data for an existing recipe.
///
/// `image` is `None` when the stored image is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeChanges {
    pub name: String,
    pub text: String,
    pub image: Option<String>,
    pub cooking_time: i32,
    pub associations: RecipeAssociations,
}

/// Per-user recipe collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeList {
    Favorites,
    ShoppingCart,
}

impl RecipeList {
    pub fn label(self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::ShoppingCart => "shopping cart",
        }
    }
}

/// Membership condition on a user's recipe list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMembership {
    pub list: RecipeList,
    pub user_id: Uuid,
    /// `true` keeps recipes in the list, `false` keeps recipes outside it.
    pub member: bool,
}

/// Filters for the recipe listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author_id: Option<Uuid>,
    /// Any-of match on tag slugs.
    pub tag_slugs: Vec<String>,
    pub memberships: Vec<ListMembership>,
}

/// Viewer-relative flags rendered with a recipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeFlags {
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

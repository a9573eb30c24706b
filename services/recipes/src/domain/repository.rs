#![allow(async_fn_in_trait)]

use std::collections::HashSet;

use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::image::DecodedImage;
use crate::domain::types::{
    Ingredient, IngredientAmount, NewRecipe, Recipe, RecipeChanges, RecipeFilter, RecipeList, Tag,
};
use crate::error::RecipesServiceError;

/// Read access to tags.
pub trait TagRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError>;

    /// The subset of `ids` that reference existing tags.
    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, RecipesServiceError>;
}

/// Read access to the ingredient catalog.
pub trait IngredientRepository: Send + Sync {
    /// Ingredients ordered by name, optionally restricted to a case-insensitive name prefix.
    async fn search(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError>;

    /// The subset of `ids` that reference existing ingredients.
    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, RecipesServiceError>;
}

/// Recipes with their tag and ingredient associations.
pub trait RecipeRepository: Send + Sync {
    /// Whether a local `users` row exists. Recipes and list rows reference it.
    async fn user_exists(&self, user_id: Uuid) -> Result<bool, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError>;

    /// Newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesServiceError>;

    /// Insert the recipe and its associations in one transaction. Returns the new id.
    async fn create(&self, recipe: &NewRecipe) -> Result<i32, RecipesServiceError>;

    /// Update scalar fields and replace both association sets in one transaction.
    /// Returns `false` if the recipe does not exist.
    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<bool, RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError>;

    /// Every ingredient line of the given recipes.
    async fn ingredient_amounts(
        &self,
        recipe_ids: &[i32],
    ) -> Result<Vec<IngredientAmount>, RecipesServiceError>;
}

/// Per-user favorites and shopping cart.
pub trait RecipeListRepository: Send + Sync {
    /// Insert `(user, recipe)` into the list. Returns `false` if it was already present.
    async fn add(
        &self,
        list: RecipeList,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn remove(
        &self,
        list: RecipeList,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError>;

    /// The subset of `recipe_ids` present in the user's list.
    async fn contained(
        &self,
        list: RecipeList,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError>;

    async fn recipe_ids(
        &self,
        list: RecipeList,
        user_id: Uuid,
    ) -> Result<Vec<i32>, RecipesServiceError>;
}

/// Storage for decoded recipe images.
pub trait ImageStore: Send + Sync {
    /// Persist the image and return the URL path it is served under.
    async fn save(&self, image: &DecodedImage) -> Result<String, RecipesServiceError>;

    /// Delete the image served under `url`. Missing files and foreign URLs are not errors.
    async fn remove(&self, url: &str) -> Result<(), RecipesServiceError>;
}

use uuid::Uuid;

use crate::domain::repository::{RecipeListRepository, RecipeRepository};
use crate::domain::representation::ShortRecipeView;
use crate::domain::types::RecipeList;
use crate::error::RecipesServiceError;
use crate::usecase::recipe::ensure_registered;

// ── AddToList ────────────────────────────────────────────────────────────────

/// Adds a recipe to the user's favorites or shopping cart.
///
/// Favorites reject a second add of the same recipe; the cart accepts it
/// and keeps a single entry.
pub struct AddToListUseCase<R: RecipeRepository, L: RecipeListRepository> {
    pub recipes: R,
    pub lists: L,
}

impl<R: RecipeRepository, L: RecipeListRepository> AddToListUseCase<R, L> {
    pub async fn execute(
        &self,
        list: RecipeList,
        user_id: Option<Uuid>,
        recipe_id: i32,
    ) -> Result<ShortRecipeView, RecipesServiceError> {
        let user_id = user_id.ok_or(RecipesServiceError::Unauthorized)?;
        ensure_registered(&self.recipes, user_id).await?;
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;

        let inserted = self.lists.add(list, user_id, recipe_id).await?;
        if !inserted && list == RecipeList::Favorites {
            return Err(RecipesServiceError::status(format!(
                "recipe is already in {}",
                list.label()
            )));
        }
        tracing::debug!(%user_id, recipe_id, list = list.label(), inserted, "recipe added to list");
        Ok(ShortRecipeView::from(recipe))
    }
}

// ── RemoveFromList ───────────────────────────────────────────────────────────

pub struct RemoveFromListUseCase<R: RecipeRepository, L: RecipeListRepository> {
    pub recipes: R,
    pub lists: L,
}

impl<R: RecipeRepository, L: RecipeListRepository> RemoveFromListUseCase<R, L> {
    pub async fn execute(
        &self,
        list: RecipeList,
        user_id: Option<Uuid>,
        recipe_id: i32,
    ) -> Result<(), RecipesServiceError> {
        let user_id = user_id.ok_or(RecipesServiceError::Unauthorized)?;
        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        if !self.lists.remove(list, user_id, recipe_id).await? {
            return Err(RecipesServiceError::status(format!(
                "recipe is not in {}",
                list.label()
            )));
        }
        Ok(())
    }
}

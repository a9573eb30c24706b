use uuid::Uuid;

use crate::domain::repository::{RecipeListRepository, RecipeRepository};
use crate::domain::shopping_list::{aggregate, render_text};
use crate::domain::types::RecipeList;
use crate::error::RecipesServiceError;

pub struct DownloadShoppingListUseCase<R: RecipeRepository, L: RecipeListRepository> {
    pub recipes: R,
    pub lists: L,
}

impl<R: RecipeRepository, L: RecipeListRepository> DownloadShoppingListUseCase<R, L> {
    /// Plain-text shopping list for every recipe in the user's cart.
    pub async fn execute(&self, user_id: Option<Uuid>) -> Result<String, RecipesServiceError> {
        let user_id = user_id.ok_or(RecipesServiceError::Unauthorized)?;
        let recipe_ids = self
            .lists
            .recipe_ids(RecipeList::ShoppingCart, user_id)
            .await?;
        let lines = self.recipes.ingredient_amounts(&recipe_ids).await?;
        let items = aggregate(lines);
        tracing::debug!(%user_id, recipes = recipe_ids.len(), items = items.len(), "shopping list built");
        Ok(render_text(&items))
    }
}

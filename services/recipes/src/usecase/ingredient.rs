use crate::domain::repository::IngredientRepository;
use crate::domain::types::Ingredient;
use crate::error::RecipesServiceError;

pub struct SearchIngredientsUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> SearchIngredientsUseCase<R> {
    /// Blank prefixes list the whole catalog.
    pub async fn execute(&self, name: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let prefix = name.map(str::trim).filter(|p| !p.is_empty());
        self.repo.search(prefix).await
    }
}

pub struct GetIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> GetIngredientUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::IngredientNotFound)
    }
}

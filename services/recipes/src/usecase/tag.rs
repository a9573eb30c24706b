use crate::domain::repository::TagRepository;
use crate::domain::types::Tag;
use crate::error::RecipesServiceError;

pub struct ListTagsUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> ListTagsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        self.repo.list().await
    }
}

pub struct GetTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> GetTagUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Tag, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::TagNotFound)
    }
}

use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbIngredientRepository, DbRecipeListRepository, DbRecipeRepository, DbTagRepository,
};
use crate::infra::image::FsImageStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub images: FsImageStore,
}

impl AppState {
    pub fn tag_repo(&self) -> DbTagRepository {
        DbTagRepository {
            db: self.db.clone(),
        }
    }

    pub fn ingredient_repo(&self) -> DbIngredientRepository {
        DbIngredientRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn list_repo(&self) -> DbRecipeListRepository {
        DbRecipeListRepository {
            db: self.db.clone(),
        }
    }

    pub fn image_store(&self) -> FsImageStore {
        self.images.clone()
    }
}

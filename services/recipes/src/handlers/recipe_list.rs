use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use foodgram_auth_types::identity::MaybeIdentity;

use crate::domain::representation::ShortRecipeView;
use crate::domain::types::RecipeList;
use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::recipe_list::{AddToListUseCase, RemoveFromListUseCase};

async fn add(
    list: RecipeList,
    identity: MaybeIdentity,
    state: AppState,
    recipe_id: i32,
) -> Result<(StatusCode, Json<ShortRecipeView>), RecipesServiceError> {
    let usecase = AddToListUseCase {
        recipes: state.recipe_repo(),
        lists: state.list_repo(),
    };
    let recipe = usecase.execute(list, identity.user_id(), recipe_id).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

async fn remove(
    list: RecipeList,
    identity: MaybeIdentity,
    state: AppState,
    recipe_id: i32,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = RemoveFromListUseCase {
        recipes: state.recipe_repo(),
        lists: state.list_repo(),
    };
    usecase.execute(list, identity.user_id(), recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /api/recipes/{id}/favorite ──────────────────────────────────────────

pub async fn add_favorite(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<ShortRecipeView>), RecipesServiceError> {
    add(RecipeList::Favorites, identity, state, id).await
}

// ── DELETE /api/recipes/{id}/favorite ────────────────────────────────────────

pub async fn remove_favorite(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    remove(RecipeList::Favorites, identity, state, id).await
}

// ── POST /api/recipes/{id}/shopping_cart ─────────────────────────────────────

pub async fn add_to_shopping_cart(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<ShortRecipeView>), RecipesServiceError> {
    add(RecipeList::ShoppingCart, identity, state, id).await
}

// ── DELETE /api/recipes/{id}/shopping_cart ───────────────────────────────────

pub async fn remove_from_shopping_cart(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    remove(RecipeList::ShoppingCart, identity, state, id).await
}

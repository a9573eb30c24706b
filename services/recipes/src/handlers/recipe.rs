use axum::{
    Json,
    extract::{Path, RawQuery, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use foodgram_auth_types::identity::MaybeIdentity;
use foodgram_core::error::FieldErrors;
use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::representation::RecipeView;
use crate::domain::validation::RecipeWriteRequest;
use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesUseCase,
    RecipeListQuery, UpdateRecipeUseCase,
};

/// Unwrap a JSON body, reporting syntax and shape problems under `body`.
pub(crate) fn json_body<T>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, RecipesServiceError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        RecipesServiceError::Validation(FieldErrors::single("body", rejection.body_text()))
    })
}

// ── Query params ─────────────────────────────────────────────────────────────

/// `?page=&limit=&author=&tags[]=&is_favorited=&is_in_shopping_cart=`
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct RecipeListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<u8>,
    pub is_in_shopping_cart: Option<u8>,
}

impl RecipeListParams {
    pub fn parse(raw_query: Option<&str>) -> Result<Self, RecipesServiceError> {
        raw_query
            .filter(|q| !q.is_empty())
            .map(serde_qs::from_str)
            .transpose()
            .map_err(|e| {
                RecipesServiceError::Validation(FieldErrors::single("query", e.to_string()))
            })
            .map(Option::unwrap_or_default)
    }

    pub fn page(&self) -> PageRequest {
        let default = PageRequest::default();
        PageRequest {
            limit: self.limit.unwrap_or(default.limit),
            page: self.page.unwrap_or(default.page),
        }
        .clamped()
    }

    pub fn into_query(self) -> RecipeListQuery {
        RecipeListQuery {
            author_id: self.author,
            tag_slugs: self.tags,
            is_favorited: self.is_favorited.map(|v| v != 0),
            is_in_shopping_cart: self.is_in_shopping_cart.map(|v| v != 0),
        }
    }
}

// ── GET /api/recipes ─────────────────────────────────────────────────────────

pub async fn list_recipes(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<RecipeView>>, RecipesServiceError> {
    let params = RecipeListParams::parse(raw_query.as_deref())?;
    let page = params.page();
    let usecase = ListRecipesUseCase {
        recipes: state.recipe_repo(),
        lists: state.list_repo(),
    };
    let recipes = usecase
        .execute(identity.user_id(), params.into_query(), page)
        .await?;
    Ok(Json(recipes))
}

// ── GET /api/recipes/{id} ────────────────────────────────────────────────────

pub async fn get_recipe(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeView>, RecipesServiceError> {
    let usecase = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        lists: state.list_repo(),
    };
    Ok(Json(usecase.execute(identity.user_id(), id).await?))
}

// ── POST /api/recipes ────────────────────────────────────────────────────────

pub async fn create_recipe(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    body: Result<Json<RecipeWriteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecipeView>), RecipesServiceError> {
    let identity = identity.ok_or(RecipesServiceError::Unauthorized)?;
    let request = json_body(body)?;
    let usecase = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        lists: state.list_repo(),
        images: state.image_store(),
    };
    let recipe = usecase.execute(Some(identity), request).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

// ── PATCH /api/recipes/{id} ──────────────────────────────────────────────────

pub async fn update_recipe(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Result<Json<RecipeWriteRequest>, JsonRejection>,
) -> Result<Json<RecipeView>, RecipesServiceError> {
    let identity = identity.ok_or(RecipesServiceError::Unauthorized)?;
    let request = json_body(body)?;
    let usecase = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        lists: state.list_repo(),
        images: state.image_store(),
    };
    Ok(Json(usecase.execute(Some(identity), id, request).await?))
}

// ── DELETE /api/recipes/{id} ─────────────────────────────────────────────────

pub async fn delete_recipe(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
        images: state.image_store(),
    };
    usecase.execute(identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

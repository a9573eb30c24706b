use axum::{
    Json,
    extract::{Path, State},
};

use crate::domain::representation::TagView;
use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::tag::{GetTagUseCase, ListTagsUseCase};

// ── GET /api/tags ────────────────────────────────────────────────────────────

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagView>>, RecipesServiceError> {
    let usecase = ListTagsUseCase {
        repo: state.tag_repo(),
    };
    let tags = usecase.execute().await?;
    Ok(Json(tags.into_iter().map(TagView::from).collect()))
}

// ── GET /api/tags/{id} ───────────────────────────────────────────────────────

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TagView>, RecipesServiceError> {
    let usecase = GetTagUseCase {
        repo: state.tag_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};

use foodgram_auth_types::identity::MaybeIdentity;

use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::shopping_cart::DownloadShoppingListUseCase;

pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

// ── GET /api/recipes/download_shopping_cart ──────────────────────────────────

pub async fn download_shopping_cart(
    identity: MaybeIdentity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, RecipesServiceError> {
    let usecase = DownloadShoppingListUseCase {
        recipes: state.recipe_repo(),
        lists: state.list_repo(),
    };
    let text = usecase.execute(identity.user_id()).await?;
    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SHOPPING_LIST_FILENAME}\""),
            ),
        ],
        text,
    ))
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use foodgram_core::error::{ErrorBody, FieldErrors};

/// Recipes service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RecipesServiceError {
    #[error("authentication required")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("invalid request")]
    Validation(FieldErrors),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RecipesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::Validation(_) => "VALIDATION",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Validation failure reported under the `status` key.
    pub fn status(message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single("status", message))
    }
}

impl From<FieldErrors> for RecipesServiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl IntoResponse for RecipesServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::RecipeNotFound | Self::TagNotFound | Self::IngredientNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let fields = match &self {
            Self::Validation(fields) => Some(fields),
            _ => None,
        };
        let body = ErrorBody {
            kind: self.kind(),
            message: self.to_string(),
            fields,
        };
        (status, axum::Json(body)).into_response()
    }
}

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use foodgram_core::health::healthz;
use foodgram_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    health::readyz,
    ingredient::{get_ingredient, list_ingredients},
    recipe::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe},
    recipe_list::{add_favorite, add_to_shopping_cart, remove_favorite, remove_from_shopping_cart},
    shopping_cart::download_shopping_cart,
    tag::{get_tag, list_tags},
};
use crate::state::AppState;

fn api_routes() -> Router<AppState> {
    Router::new()
        // Tags
        .route("/tags", get(list_tags))
        .route("/tags/{id}", get(get_tag))
        // Ingredients
        .route("/ingredients", get(list_ingredients))
        .route("/ingredients/{id}", get(get_ingredient))
        // Recipes
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/download_shopping_cart",
            get(download_shopping_cart),
        )
        .route(
            "/recipes/{id}",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        // Favorites / shopping cart
        .route(
            "/recipes/{id}/favorite",
            post(add_favorite).delete(remove_favorite),
        )
        .route(
            "/recipes/{id}/shopping_cart",
            post(add_to_shopping_cart).delete(remove_from_shopping_cart),
        )
}

pub fn build_router(state: AppState) -> Router {
    let media_url = state.images.url_prefix.trim_end_matches('/').to_owned();
    let media = ServeDir::new(&state.images.root);
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes());
    // Media served at the root when MEDIA_URL is "/".
    let router = if media_url.is_empty() {
        router.fallback_service(media)
    } else {
        router.nest_service(&media_url, media)
    };
    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
}

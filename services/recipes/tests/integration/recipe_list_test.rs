use foodgram_recipes::domain::types::RecipeList;
use foodgram_recipes::domain::validation::{IngredientAmountInput, RecipeWriteRequest};
use foodgram_recipes::error::RecipesServiceError;

use crate::helpers::{MemoryStore, add_uc, create_uc, download_uc, recipe_request, remove_uc};

fn status_message(result: Result<impl std::fmt::Debug, RecipesServiceError>) -> String {
    let Err(RecipesServiceError::Validation(errors)) = result else {
        panic!("expected status error, got {result:?}");
    };
    errors.get("status").expect("status field")[0].clone()
}

// ── Favorites ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_second_favorite_of_same_recipe() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");
    let recipe = create_uc(&store)
        .execute(Some(cook), recipe_request())
        .await
        .unwrap();

    let short = add_uc(&store)
        .execute(RecipeList::Favorites, Some(cook.user_id), recipe.id)
        .await
        .unwrap();
    assert_eq!(short.id, recipe.id);
    assert_eq!(short.name, "Pancakes");
    assert_eq!(short.cooking_time, 10);

    let again = add_uc(&store)
        .execute(RecipeList::Favorites, Some(cook.user_id), recipe.id)
        .await;
    assert_eq!(status_message(again), "recipe is already in favorites");
    assert_eq!(store.list_len(RecipeList::Favorites), 1);
}

#[tokio::test]
async fn should_require_identity_for_list_changes() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");
    let recipe = create_uc(&store)
        .execute(Some(cook), recipe_request())
        .await
        .unwrap();

    let added = add_uc(&store)
        .execute(RecipeList::Favorites, None, recipe.id)
        .await;
    assert!(matches!(added, Err(RecipesServiceError::Unauthorized)));

    let removed = remove_uc(&store)
        .execute(RecipeList::ShoppingCart, None, recipe.id)
        .await;
    assert!(matches!(removed, Err(RecipesServiceError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_list_changes_for_identity_without_user_row() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");
    let recipe = create_uc(&store)
        .execute(Some(cook), recipe_request())
        .await
        .unwrap();
    let ghost = store.unregistered();

    for list in [RecipeList::Favorites, RecipeList::ShoppingCart] {
        let result = add_uc(&store)
            .execute(list, Some(ghost.user_id), recipe.id)
            .await;
        assert!(matches!(result, Err(RecipesServiceError::Unauthorized)));
        assert_eq!(store.list_len(list), 0);
    }
}

#[tokio::test]
async fn should_return_not_found_for_unknown_recipe() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");

    let added = add_uc(&store)
        .execute(RecipeList::ShoppingCart, Some(cook.user_id), 777)
        .await;
    assert!(matches!(added, Err(RecipesServiceError::RecipeNotFound)));

    let removed = remove_uc(&store)
        .execute(RecipeList::Favorites, Some(cook.user_id), 777)
        .await;
    assert!(matches!(removed, Err(RecipesServiceError::RecipeNotFound)));
}

// ── Shopping cart ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_keep_single_cart_entry_on_repeated_add() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");
    let recipe = create_uc(&store)
        .execute(Some(cook), recipe_request())
        .await
        .unwrap();

    for _ in 0..2 {
        add_uc(&store)
            .execute(RecipeList::ShoppingCart, Some(cook.user_id), recipe.id)
            .await
            .unwrap();
    }
    assert_eq!(store.list_len(RecipeList::ShoppingCart), 1);
}

#[tokio::test]
async fn should_report_removal_of_absent_entry() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");
    let recipe = create_uc(&store)
        .execute(Some(cook), recipe_request())
        .await
        .unwrap();

    let result = remove_uc(&store)
        .execute(RecipeList::ShoppingCart, Some(cook.user_id), recipe.id)
        .await;
    assert_eq!(status_message(result), "recipe is not in shopping cart");

    add_uc(&store)
        .execute(RecipeList::ShoppingCart, Some(cook.user_id), recipe.id)
        .await
        .unwrap();
    remove_uc(&store)
        .execute(RecipeList::ShoppingCart, Some(cook.user_id), recipe.id)
        .await
        .unwrap();
    assert_eq!(store.list_len(RecipeList::ShoppingCart), 0);
}

#[tokio::test]
async fn should_sum_cart_ingredients_by_name_and_unit() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");
    let shopper = store.author("shopper");

    let pancakes = create_uc(&store)
        .execute(Some(cook), recipe_request())
        .await
        .unwrap();
    let omelette = create_uc(&store)
        .execute(
            Some(cook),
            RecipeWriteRequest {
                ingredients: vec![
                    IngredientAmountInput { id: 7, amount: 3 },
                    IngredientAmountInput { id: 5, amount: 20 },
                    IngredientAmountInput { id: 6, amount: 100 },
                ],
                name: "Omelette".to_owned(),
                ..recipe_request()
            },
        )
        .await
        .unwrap();
    // Not in the shopper's cart, must not be counted.
    create_uc(&store)
        .execute(
            Some(cook),
            RecipeWriteRequest {
                ingredients: vec![IngredientAmountInput { id: 6, amount: 999 }],
                ..recipe_request()
            },
        )
        .await
        .unwrap();

    for id in [pancakes.id, omelette.id] {
        add_uc(&store)
            .execute(RecipeList::ShoppingCart, Some(shopper.user_id), id)
            .await
            .unwrap();
    }

    let text = download_uc(&store)
        .execute(Some(shopper.user_id))
        .await
        .unwrap();
    assert_eq!(
        text,
        "Shopping list\n\n- eggs (pcs) — 3\n- flour (g) — 23\n- milk (ml) — 100\n"
    );
}

#[tokio::test]
async fn should_render_empty_list_for_empty_cart() {
    let store = MemoryStore::seeded();
    let shopper = store.author("shopper");

    let text = download_uc(&store)
        .execute(Some(shopper.user_id))
        .await
        .unwrap();
    assert_eq!(text, "Shopping list\n\n");

    let anonymous = download_uc(&store).execute(None).await;
    assert!(matches!(anonymous, Err(RecipesServiceError::Unauthorized)));
}

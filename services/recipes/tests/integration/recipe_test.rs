use std::path::Path;

use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;
use foodgram_recipes::domain::types::RecipeList;
use foodgram_recipes::domain::validation::{IngredientAmountInput, RecipeWriteRequest};
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::infra::image::{FsImageStore, RECIPE_IMAGE_DIR};
use foodgram_recipes::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, RecipeListQuery, UpdateRecipeUseCase,
};

use crate::helpers::{
    MemoryStore, add_uc, create_uc, delete_uc, get_uc, list_uc, recipe_request, update_uc,
};

// ── CreateRecipe ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_recipe_and_render_for_author() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");

    let view = create_uc(&store)
        .execute(Some(cook), recipe_request())
        .await
        .unwrap();

    assert_eq!(view.author.id, cook.user_id);
    assert_eq!(view.author.username, "cook");
    assert_eq!(
        view.tags.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(view.ingredients.len(), 1);
    assert_eq!(view.ingredients[0].id, 5);
    assert_eq!(view.ingredients[0].name, "flour");
    assert_eq!(view.ingredients[0].measurement_unit, "g");
    assert_eq!(view.ingredients[0].amount, 3);
    assert_eq!(view.cooking_time, 10);
    assert!(!view.is_favorited);
    assert!(!view.is_in_shopping_cart);
    assert_eq!(view.image, store.saved_images()[0]);
}

#[tokio::test]
async fn should_reject_anonymous_create() {
    let store = MemoryStore::seeded();
    let result = create_uc(&store).execute(None, recipe_request()).await;
    assert!(matches!(result, Err(RecipesServiceError::Unauthorized)));
    assert_eq!(store.recipe_count(), 0);
}

#[tokio::test]
async fn should_reject_identity_without_user_row_before_storing_anything() {
    let store = MemoryStore::seeded();
    let ghost = store.unregistered();

    let result = create_uc(&store).execute(Some(ghost), recipe_request()).await;

    assert!(matches!(result, Err(RecipesServiceError::Unauthorized)));
    assert_eq!(store.recipe_count(), 0);
    assert!(store.saved_images().is_empty());
}

#[tokio::test]
async fn should_report_every_failing_field_and_store_nothing() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");

    let result = create_uc(&store)
        .execute(
            Some(cook),
            RecipeWriteRequest {
                tags: vec![1, 1, 99],
                ingredients: vec![
                    IngredientAmountInput { id: 5, amount: 1 },
                    IngredientAmountInput { id: 404, amount: 0 },
                ],
                image: None,
                cooking_time: 0,
                ..recipe_request()
            },
        )
        .await;

    let Err(RecipesServiceError::Validation(errors)) = result else {
        panic!("expected validation error, got {result:?}");
    };
    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        ["cooking_time", "image", "ingredients", "tags"]
    );
    let tag_messages = errors.get("tags").unwrap();
    assert!(tag_messages.iter().any(|m| m == "unknown tag id 99"));
    let ingredient_messages = errors.get("ingredients").unwrap();
    assert!(ingredient_messages.iter().any(|m| m == "unknown ingredient id 404"));
    assert_eq!(store.recipe_count(), 0);
    assert!(store.saved_images().is_empty());
}

#[tokio::test]
async fn should_reject_duplicate_ingredient_with_different_amounts() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");

    let result = create_uc(&store)
        .execute(
            Some(cook),
            RecipeWriteRequest {
                ingredients: vec![
                    IngredientAmountInput { id: 5, amount: 1 },
                    IngredientAmountInput { id: 5, amount: 2 },
                ],
                ..recipe_request()
            },
        )
        .await;

    let Err(RecipesServiceError::Validation(errors)) = result else {
        panic!("expected validation error, got {result:?}");
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), ["ingredients"]);
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_replace_associations_on_update() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");
    let created = create_uc(&store)
        .execute(Some(cook), recipe_request())
        .await
        .unwrap();

    let updated = update_uc(&store)
        .execute(
            Some(cook),
            created.id,
            RecipeWriteRequest {
                tags: vec![3],
                ingredients: vec![
                    IngredientAmountInput { id: 6, amount: 200 },
                    IngredientAmountInput { id: 7, amount: 2 },
                ],
                image: None,
                name: "Crepes".to_owned(),
                ..recipe_request()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Crepes");
    assert_eq!(updated.tags.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3]);
    assert_eq!(
        updated
            .ingredients
            .iter()
            .map(|i| (i.id, i.amount))
            .collect::<Vec<_>>(),
        vec![(6, 200), (7, 2)]
    );
    assert_eq!(updated.image, created.image);
}

#[tokio::test]
async fn should_forbid_update_by_other_user_but_allow_staff() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");
    let stranger = store.author("stranger");
    let moderator = store.staff("moderator");
    let created = create_uc(&store)
        .execute(Some(cook), recipe_request())
        .await
        .unwrap();

    let result = update_uc(&store)
        .execute(Some(stranger), created.id, recipe_request())
        .await;
    assert!(matches!(result, Err(RecipesServiceError::Forbidden)));

    let updated = update_uc(&store)
        .execute(
            Some(moderator),
            created.id,
            RecipeWriteRequest {
                name: "Moderated".to_owned(),
                ..recipe_request()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Moderated");
    assert_eq!(updated.author.id, cook.user_id);
}

#[tokio::test]
async fn should_return_not_found_for_missing_recipe_update() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");
    let result = update_uc(&store)
        .execute(Some(cook), 42, recipe_request())
        .await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_recipe_and_its_list_entries() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");
    let created = create_uc(&store)
        .execute(Some(cook), recipe_request())
        .await
        .unwrap();
    add_uc(&store)
        .execute(RecipeList::Favorites, Some(cook.user_id), created.id)
        .await
        .unwrap();

    let stranger = store.author("stranger");
    let result = delete_uc(&store).execute(Some(stranger), created.id).await;
    assert!(matches!(result, Err(RecipesServiceError::Forbidden)));

    delete_uc(&store)
        .execute(Some(cook), created.id)
        .await
        .unwrap();
    assert_eq!(store.recipe_count(), 0);
    assert_eq!(store.list_len(RecipeList::Favorites), 0);

    let result = get_uc(&store).execute(None, created.id).await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}

// ── Image files ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_track_stored_images_through_update_and_delete() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");
    let created = create_uc(&store)
        .execute(Some(cook), recipe_request())
        .await
        .unwrap();

    let updated = update_uc(&store)
        .execute(Some(cook), created.id, recipe_request())
        .await
        .unwrap();
    assert_ne!(updated.image, created.image);
    assert_eq!(store.saved_images(), vec![updated.image.clone()]);

    delete_uc(&store)
        .execute(Some(cook), created.id)
        .await
        .unwrap();
    assert!(store.saved_images().is_empty());
}

async fn image_file_count(root: &Path) -> usize {
    let Ok(mut entries) = tokio::fs::read_dir(root.join(RECIPE_IMAGE_DIR)).await else {
        return 0;
    };
    let mut count = 0;
    while entries.next_entry().await.unwrap().is_some() {
        count += 1;
    }
    count
}

#[tokio::test]
async fn should_leave_no_image_files_behind_on_disk() {
    let store = MemoryStore::seeded();
    let root = std::env::temp_dir().join(format!("foodgram-media-{}", Uuid::new_v4()));
    let images = FsImageStore::new(&root, "/media/");
    let cook = store.author("cook");

    let created = CreateRecipeUseCase {
        recipes: store.clone(),
        tags: store.clone(),
        ingredients: store.clone(),
        lists: store.clone(),
        images: images.clone(),
    }
    .execute(Some(cook), recipe_request())
    .await
    .unwrap();
    assert_eq!(image_file_count(&root).await, 1);

    let update = UpdateRecipeUseCase {
        recipes: store.clone(),
        tags: store.clone(),
        ingredients: store.clone(),
        lists: store.clone(),
        images: images.clone(),
    };
    update
        .execute(Some(cook), created.id, recipe_request())
        .await
        .unwrap();
    assert_eq!(image_file_count(&root).await, 1);

    // Rejected before any file is written.
    let missing = update.execute(Some(cook), created.id + 100, recipe_request()).await;
    assert!(matches!(missing, Err(RecipesServiceError::RecipeNotFound)));
    assert_eq!(image_file_count(&root).await, 1);

    DeleteRecipeUseCase {
        recipes: store.clone(),
        images: images.clone(),
    }
    .execute(Some(cook), created.id)
    .await
    .unwrap();
    assert_eq!(image_file_count(&root).await, 0);

    let _ = tokio::fs::remove_dir_all(&root).await;
}

// ── Get / List ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_render_flags_relative_to_viewer() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");
    let fan = store.author("fan");
    let created = create_uc(&store)
        .execute(Some(cook), recipe_request())
        .await
        .unwrap();
    add_uc(&store)
        .execute(RecipeList::Favorites, Some(fan.user_id), created.id)
        .await
        .unwrap();

    let as_fan = get_uc(&store)
        .execute(Some(fan.user_id), created.id)
        .await
        .unwrap();
    assert!(as_fan.is_favorited);
    assert!(!as_fan.is_in_shopping_cart);

    let as_cook = get_uc(&store)
        .execute(Some(cook.user_id), created.id)
        .await
        .unwrap();
    assert!(!as_cook.is_favorited);

    let anonymous = get_uc(&store).execute(None, created.id).await.unwrap();
    assert!(!anonymous.is_favorited);
}

#[tokio::test]
async fn should_list_newest_first_with_filters_and_pagination() {
    let store = MemoryStore::seeded();
    let cook = store.author("cook");
    let baker = store.author("baker");
    let mut ids = Vec::new();
    for (who, tags) in [(cook, vec![1]), (baker, vec![2]), (cook, vec![2, 3])] {
        let view = create_uc(&store)
            .execute(
                Some(who),
                RecipeWriteRequest {
                    tags,
                    ..recipe_request()
                },
            )
            .await
            .unwrap();
        ids.push(view.id);
    }
    add_uc(&store)
        .execute(RecipeList::Favorites, Some(baker.user_id), ids[0])
        .await
        .unwrap();

    let all = list_uc(&store)
        .execute(None, RecipeListQuery::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.count, 3);
    assert_eq!(
        all.results.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![ids[2], ids[1], ids[0]]
    );

    let by_cook = list_uc(&store)
        .execute(
            None,
            RecipeListQuery {
                author_id: Some(cook.user_id),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_cook.count, 2);

    let lunch_or_dinner = list_uc(&store)
        .execute(
            None,
            RecipeListQuery {
                tag_slugs: vec!["lunch".to_owned(), "dinner".to_owned()],
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(
        lunch_or_dinner.results.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![ids[2], ids[1]]
    );

    let favorites = list_uc(&store)
        .execute(
            Some(baker.user_id),
            RecipeListQuery {
                is_favorited: Some(true),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(favorites.count, 1);
    assert!(favorites.results[0].is_favorited);

    // Membership filters are ignored for anonymous viewers.
    let anonymous = list_uc(&store)
        .execute(
            None,
            RecipeListQuery {
                is_favorited: Some(true),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(anonymous.count, 3);

    let second_page = list_uc(&store)
        .execute(
            None,
            RecipeListQuery::default(),
            PageRequest { limit: 2, page: 2 },
        )
        .await
        .unwrap();
    assert_eq!(second_page.count, 3);
    assert_eq!(
        second_page.results.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![ids[0]]
    );
}

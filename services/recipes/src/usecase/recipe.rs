use std::collections::BTreeSet;

use chrono::Utc;
use uuid::Uuid;

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_core::error::FieldErrors;
use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{
    ImageStore, IngredientRepository, RecipeListRepository, RecipeRepository, TagRepository,
};
use crate::domain::representation::RecipeView;
use crate::domain::types::{
    ListMembership, NewRecipe, Recipe, RecipeChanges, RecipeFilter, RecipeFlags, RecipeList,
};
use crate::domain::validation::{
    ImageRequirement, RecipeWriteRequest, ValidatedRecipe, validate_references,
};
use crate::error::RecipesServiceError;

// ── Rendering ────────────────────────────────────────────────────────────────

/// Render recipes for `viewer`, loading both flags with one lookup per list.
///
/// Anonymous viewers get both flags `false` without touching the lists.
pub async fn render_recipes<L: RecipeListRepository>(
    lists: &L,
    viewer: Option<Uuid>,
    recipes: Vec<Recipe>,
) -> Result<Vec<RecipeView>, RecipesServiceError> {
    let Some(user_id) = viewer else {
        return Ok(recipes
            .into_iter()
            .map(|recipe| RecipeView::new(recipe, RecipeFlags::default()))
            .collect());
    };
    if recipes.is_empty() {
        return Ok(vec![]);
    }
    let ids: Vec<i32> = recipes.iter().map(|recipe| recipe.id).collect();
    let favorited = lists.contained(RecipeList::Favorites, user_id, &ids).await?;
    let in_cart = lists
        .contained(RecipeList::ShoppingCart, user_id, &ids)
        .await?;
    Ok(recipes
        .into_iter()
        .map(|recipe| {
            let flags = RecipeFlags {
                is_favorited: favorited.contains(&recipe.id),
                is_in_shopping_cart: in_cart.contains(&recipe.id),
            };
            RecipeView::new(recipe, flags)
        })
        .collect())
}

pub async fn render_recipe<L: RecipeListRepository>(
    lists: &L,
    viewer: Option<Uuid>,
    recipe: Recipe,
) -> Result<RecipeView, RecipesServiceError> {
    render_recipes(lists, viewer, vec![recipe])
        .await?
        .pop()
        .ok_or_else(|| anyhow::anyhow!("rendering a recipe produced no view").into())
}

pub(crate) fn require_identity(
    identity: Option<IdentityHeaders>,
) -> Result<IdentityHeaders, RecipesServiceError> {
    identity.ok_or(RecipesServiceError::Unauthorized)
}

/// Gateway identities may predate the local `users` row the foreign keys point at.
pub(crate) async fn ensure_registered<R: RecipeRepository>(
    recipes: &R,
    user_id: Uuid,
) -> Result<(), RecipesServiceError> {
    if recipes.user_exists(user_id).await? {
        Ok(())
    } else {
        tracing::warn!(%user_id, "identity has no user row");
        Err(RecipesServiceError::Unauthorized)
    }
}

/// Best-effort removal; a leftover file is logged rather than failing the request.
async fn discard_image<S: ImageStore>(images: &S, url: &str) {
    if let Err(e) = images.remove(url).await {
        tracing::warn!(error = %e, url, "failed to remove recipe image");
    }
}

fn ensure_can_modify(
    identity: &IdentityHeaders,
    recipe: &Recipe,
) -> Result<(), RecipesServiceError> {
    if recipe.author.id == identity.user_id || identity.is_staff() {
        Ok(())
    } else {
        Err(RecipesServiceError::Forbidden)
    }
}

/// Field validation plus existence checks of every referenced tag and ingredient.
async fn validate_write<T: TagRepository, I: IngredientRepository>(
    tags: &T,
    ingredients: &I,
    request: RecipeWriteRequest,
    image: ImageRequirement,
) -> Result<ValidatedRecipe, RecipesServiceError> {
    let tag_ids: Vec<i32> = request
        .tags
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let ingredient_ids: Vec<i32> = request
        .ingredients
        .iter()
        .map(|line| line.id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut reference_errors = FieldErrors::new();
    let existing_tags = tags.existing_ids(&tag_ids).await?;
    validate_references("tags", "tag", tag_ids, &existing_tags, &mut reference_errors);
    let existing_ingredients = ingredients.existing_ids(&ingredient_ids).await?;
    validate_references(
        "ingredients",
        "ingredient",
        ingredient_ids,
        &existing_ingredients,
        &mut reference_errors,
    );

    match request.validate(image) {
        Ok(validated) => {
            reference_errors.into_result()?;
            Ok(validated)
        }
        Err(mut errors) => {
            errors.merge(reference_errors);
            Err(errors.into())
        }
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository, L: RecipeListRepository> {
    pub recipes: R,
    pub lists: L,
}

impl<R: RecipeRepository, L: RecipeListRepository> GetRecipeUseCase<R, L> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        id: i32,
    ) -> Result<RecipeView, RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        render_recipe(&self.lists, viewer, recipe).await
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

/// Listing filters as submitted by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeListQuery {
    pub author_id: Option<Uuid>,
    pub tag_slugs: Vec<String>,
    pub is_favorited: Option<bool>,
    pub is_in_shopping_cart: Option<bool>,
}

impl RecipeListQuery {
    /// Membership filters only apply to authenticated viewers.
    pub fn into_filter(self, viewer: Option<Uuid>) -> RecipeFilter {
        let mut memberships = Vec::new();
        if let Some(user_id) = viewer {
            for (list, member) in [
                (RecipeList::Favorites, self.is_favorited),
                (RecipeList::ShoppingCart, self.is_in_shopping_cart),
            ] {
                if let Some(member) = member {
                    memberships.push(ListMembership {
                        list,
                        user_id,
                        member,
                    });
                }
            }
        }
        RecipeFilter {
            author_id: self.author_id,
            tag_slugs: self.tag_slugs,
            memberships,
        }
    }
}

pub struct ListRecipesUseCase<R: RecipeRepository, L: RecipeListRepository> {
    pub recipes: R,
    pub lists: L,
}

impl<R: RecipeRepository, L: RecipeListRepository> ListRecipesUseCase<R, L> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        query: RecipeListQuery,
        page: PageRequest,
    ) -> Result<Page<RecipeView>, RecipesServiceError> {
        let filter = query.into_filter(viewer);
        let page = self.recipes.list(&filter, page.clamped()).await?;
        let results = render_recipes(&self.lists, viewer, page.results).await?;
        Ok(Page {
            count: page.count,
            results,
        })
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<R, T, I, L, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    L: RecipeListRepository,
    S: ImageStore,
{
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
    pub lists: L,
    pub images: S,
}

impl<R, T, I, L, S> CreateRecipeUseCase<R, T, I, L, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    L: RecipeListRepository,
    S: ImageStore,
{
    pub async fn execute(
        &self,
        identity: Option<IdentityHeaders>,
        request: RecipeWriteRequest,
    ) -> Result<RecipeView, RecipesServiceError> {
        let identity = require_identity(identity)?;
        ensure_registered(&self.recipes, identity.user_id).await?;
        let validated = validate_write(
            &self.tags,
            &self.ingredients,
            request,
            ImageRequirement::Required,
        )
        .await?;
        let image = validated
            .image
            .as_ref()
            .ok_or_else(|| FieldErrors::single("image", "image is required"))?;
        let image = self.images.save(image).await?;

        let created = self
            .recipes
            .create(&NewRecipe {
                author_id: identity.user_id,
                name: validated.name,
                text: validated.text,
                image: image.clone(),
                cooking_time: validated.cooking_time,
                associations: validated.associations,
                created_at: Utc::now(),
            })
            .await;
        let id = match created {
            Ok(id) => id,
            Err(e) => {
                discard_image(&self.images, &image).await;
                return Err(e);
            }
        };
        tracing::info!(recipe_id = id, author_id = %identity.user_id, "recipe created");

        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        render_recipe(&self.lists, Some(identity.user_id), recipe).await
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<R, T, I, L, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    L: RecipeListRepository,
    S: ImageStore,
{
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
    pub lists: L,
    pub images: S,
}

impl<R, T, I, L, S> UpdateRecipeUseCase<R, T, I, L, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    L: RecipeListRepository,
    S: ImageStore,
{
    pub async fn execute(
        &self,
        identity: Option<IdentityHeaders>,
        id: i32,
        request: RecipeWriteRequest,
    ) -> Result<RecipeView, RecipesServiceError> {
        let identity = require_identity(identity)?;
        let existing = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        ensure_can_modify(&identity, &existing)?;

        let validated = validate_write(
            &self.tags,
            &self.ingredients,
            request,
            ImageRequirement::Optional,
        )
        .await?;
        let image = match &validated.image {
            Some(image) => Some(self.images.save(image).await?),
            None => None,
        };

        let changes = RecipeChanges {
            name: validated.name,
            text: validated.text,
            image,
            cooking_time: validated.cooking_time,
            associations: validated.associations,
        };
        let outcome = self.recipes.update(id, &changes).await;
        if let Some(new_image) = &changes.image {
            // Keep exactly one file: the stored one on failure, the new one on success.
            match outcome {
                Ok(true) => discard_image(&self.images, &existing.image).await,
                _ => discard_image(&self.images, new_image).await,
            }
        }
        if !outcome? {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        tracing::info!(recipe_id = id, user_id = %identity.user_id, "recipe updated");

        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        render_recipe(&self.lists, Some(identity.user_id), recipe).await
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository, S: ImageStore> {
    pub recipes: R,
    pub images: S,
}

impl<R: RecipeRepository, S: ImageStore> DeleteRecipeUseCase<R, S> {
    pub async fn execute(
        &self,
        identity: Option<IdentityHeaders>,
        id: i32,
    ) -> Result<(), RecipesServiceError> {
        let identity = require_identity(identity)?;
        let existing = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        ensure_can_modify(&identity, &existing)?;
        if !self.recipes.delete(id).await? {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        discard_image(&self.images, &existing.image).await;
        tracing::info!(recipe_id = id, user_id = %identity.user_id, "recipe deleted");
        Ok(())
    }
}

use std::collections::{HashMap, HashSet};

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
    TransactionTrait,
    sea_query::{Expr, Func, LikeExpr, OnConflict, SelectStatement},
};
use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_recipes_schema::{
    favorites, ingredient_amounts, ingredients, recipe_tags, recipes, shopping_carts, tags, users,
};

use crate::domain::repository::{
    IngredientRepository, RecipeListRepository, RecipeRepository, TagRepository,
};
use crate::domain::types::{
    Author, Ingredient, IngredientAmount, NewRecipe, Recipe, RecipeAssociations, RecipeChanges,
    RecipeFilter, RecipeList, Tag,
};
use crate::error::RecipesServiceError;

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Id)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<i32> = tags::Entity::find()
            .select_only()
            .column(tags::Column::Id)
            .filter(tags::Column::Id.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("find existing tag ids")?;
        Ok(found.into_iter().collect())
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        color: model.color,
        slug: model.slug,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

/// `LIKE` pattern matching values that start with `prefix`, lower-cased.
fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl IngredientRepository for DbIngredientRepository {
    async fn search(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix.filter(|p| !p.is_empty()) {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col((
                    ingredients::Entity,
                    ingredients::Column::Name,
                ))))
                .like(LikeExpr::new(prefix_pattern(prefix)).escape('\\')),
            );
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("search ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<i32> = ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Id)
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("find existing ingredient ids")?;
        Ok(found.into_iter().collect())
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

type RecipeRow = (recipes::Model, Option<users::Model>);

impl DbRecipeRepository {
    /// Attach tags and ingredient amounts to recipe rows, preserving row order.
    async fn hydrate(&self, rows: Vec<RecipeRow>) -> Result<Vec<Recipe>, RecipesServiceError> {
        if rows.is_empty() {
            return Ok(vec![]);
        }
        let ids: Vec<i32> = rows.iter().map(|(recipe, _)| recipe.id).collect();

        let tag_rows = recipe_tags::Entity::find()
            .filter(recipe_tags::Column::RecipeId.is_in(ids.iter().copied()))
            .order_by_asc(recipe_tags::Column::RecipeId)
            .order_by_asc(recipe_tags::Column::Position)
            .find_also_related(tags::Entity)
            .all(&self.db)
            .await
            .context("load recipe tags")?;
        let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
        for (link, tag) in tag_rows {
            if let Some(tag) = tag {
                tags_by_recipe
                    .entry(link.recipe_id)
                    .or_default()
                    .push(tag_from_model(tag));
            }
        }

        let mut amounts_by_recipe: HashMap<i32, Vec<IngredientAmount>> = HashMap::new();
        for (recipe_id, line) in load_ingredient_amounts(&self.db, &ids)
            .await
            .context("load recipe ingredients")?
        {
            amounts_by_recipe.entry(recipe_id).or_default().push(line);
        }

        rows.into_iter()
            .map(|(recipe, author)| -> Result<Recipe, RecipesServiceError> {
                let author = author
                    .with_context(|| format!("recipe {} has no author row", recipe.id))?;
                Ok(Recipe {
                    tags: tags_by_recipe.remove(&recipe.id).unwrap_or_default(),
                    ingredients: amounts_by_recipe.remove(&recipe.id).unwrap_or_default(),
                    author: author_from_model(author),
                    id: recipe.id,
                    name: recipe.name,
                    text: recipe.text,
                    image: recipe.image,
                    cooking_time: recipe.cooking_time,
                    created_at: recipe.created_at,
                })
            })
            .collect()
    }
}

/// `(recipe id, ingredient line)` pairs, in insertion order.
async fn load_ingredient_amounts<C: ConnectionTrait>(
    conn: &C,
    recipe_ids: &[i32],
) -> Result<Vec<(i32, IngredientAmount)>, DbErr> {
    let rows = ingredient_amounts::Entity::find()
        .filter(ingredient_amounts::Column::RecipeId.is_in(recipe_ids.iter().copied()))
        .order_by_asc(ingredient_amounts::Column::Id)
        .find_also_related(ingredients::Entity)
        .all(conn)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|(line, ingredient)| {
            ingredient.map(|ingredient| {
                (
                    line.recipe_id,
                    IngredientAmount {
                        ingredient: ingredient_from_model(ingredient),
                        amount: line.amount,
                    },
                )
            })
        })
        .collect())
}

/// Replace both association sets of `recipe_id`.
async fn replace_associations<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    associations: &RecipeAssociations,
) -> Result<(), DbErr> {
    recipe_tags::Entity::delete_many()
        .filter(recipe_tags::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;
    ingredient_amounts::Entity::delete_many()
        .filter(ingredient_amounts::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;

    if !associations.tag_ids.is_empty() {
        let links = associations
            .tag_ids
            .iter()
            .enumerate()
            .map(|(position, &tag_id)| recipe_tags::ActiveModel {
                recipe_id: Set(recipe_id),
                tag_id: Set(tag_id),
                position: Set(position as i32),
            });
        recipe_tags::Entity::insert_many(links)
            .exec_without_returning(conn)
            .await?;
    }
    if !associations.ingredients.is_empty() {
        let lines = associations
            .ingredients
            .iter()
            .map(|line| ingredient_amounts::ActiveModel {
                recipe_id: Set(recipe_id),
                ingredient_id: Set(line.ingredient_id),
                amount: Set(line.amount),
                ..Default::default()
            });
        ingredient_amounts::Entity::insert_many(lines)
            .exec_without_returning(conn)
            .await?;
    }
    Ok(())
}

/// `SELECT recipe_id FROM <list> WHERE user_id = $1`.
fn list_subquery(list: RecipeList, user_id: Uuid) -> SelectStatement {
    match list {
        RecipeList::Favorites => favorites::Entity::find()
            .select_only()
            .column(favorites::Column::RecipeId)
            .filter(favorites::Column::UserId.eq(user_id))
            .into_query(),
        RecipeList::ShoppingCart => shopping_carts::Entity::find()
            .select_only()
            .column(shopping_carts::Column::RecipeId)
            .filter(shopping_carts::Column::UserId.eq(user_id))
            .into_query(),
    }
}

impl RecipeRepository for DbRecipeRepository {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool, RecipesServiceError> {
        let count = users::Entity::find_by_id(user_id)
            .count(&self.db)
            .await
            .context("look up user")?;
        Ok(count > 0)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let row = recipes::Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find recipe by id")?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![row]).await?.pop())
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesServiceError> {
        let page = page.clamped();
        let mut query = recipes::Entity::find();
        if let Some(author_id) = filter.author_id {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if !filter.tag_slugs.is_empty() {
            let tagged = recipe_tags::Entity::find()
                .select_only()
                .column(recipe_tags::Column::RecipeId)
                .inner_join(tags::Entity)
                .filter(tags::Column::Slug.is_in(filter.tag_slugs.iter().cloned()))
                .into_query();
            query = query.filter(recipes::Column::Id.in_subquery(tagged));
        }
        for membership in &filter.memberships {
            let members = list_subquery(membership.list, membership.user_id);
            query = if membership.member {
                query.filter(recipes::Column::Id.in_subquery(members))
            } else {
                query.filter(recipes::Column::Id.not_in_subquery(members))
            };
        }

        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count recipes")?;
        let rows = query
            .find_also_related(users::Entity)
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list recipes")?;
        Ok(Page {
            count,
            results: self.hydrate(rows).await?,
        })
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<i32, RecipesServiceError> {
        let id = self
            .db
            .transaction::<_, i32, DbErr>(|txn| {
                let recipe = recipe.clone();
                Box::pin(async move {
                    let model = recipes::ActiveModel {
                        author_id: Set(recipe.author_id),
                        name: Set(recipe.name),
                        text: Set(recipe.text),
                        image: Set(recipe.image),
                        cooking_time: Set(recipe.cooking_time),
                        created_at: Set(recipe.created_at),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    replace_associations(txn, model.id, &recipe.associations).await?;
                    Ok(model.id)
                })
            })
            .await
            .context("create recipe")?;
        Ok(id)
    }

    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<bool, RecipesServiceError> {
        let updated = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let changes = changes.clone();
                Box::pin(async move {
                    let exists = recipes::Entity::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                        .is_some();
                    if !exists {
                        return Ok(false);
                    }
                    let mut model = recipes::ActiveModel {
                        id: Set(id),
                        name: Set(changes.name),
                        text: Set(changes.text),
                        cooking_time: Set(changes.cooking_time),
                        ..Default::default()
                    };
                    if let Some(image) = changes.image {
                        model.image = Set(image);
                    }
                    model.update(txn).await?;
                    replace_associations(txn, id, &changes.associations).await?;
                    Ok(true)
                })
            })
            .await
            .context("update recipe")?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn ingredient_amounts(
        &self,
        recipe_ids: &[i32],
    ) -> Result<Vec<IngredientAmount>, RecipesServiceError> {
        if recipe_ids.is_empty() {
            return Ok(vec![]);
        }
        let lines = load_ingredient_amounts(&self.db, recipe_ids)
            .await
            .context("load ingredient amounts")?;
        Ok(lines.into_iter().map(|(_, line)| line).collect())
    }
}

fn author_from_model(model: users::Model) -> Author {
    Author {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
    }
}

// ── Favorites / shopping cart repository ─────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeListRepository {
    pub db: DatabaseConnection,
}

impl RecipeListRepository for DbRecipeListRepository {
    async fn add(
        &self,
        list: RecipeList,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let created_at = Utc::now();
        let inserted = match list {
            RecipeList::Favorites => {
                favorites::Entity::insert(favorites::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                    created_at: Set(created_at),
                })
                .on_conflict(
                    OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
            RecipeList::ShoppingCart => {
                shopping_carts::Entity::insert(shopping_carts::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                    created_at: Set(created_at),
                })
                .on_conflict(
                    OnConflict::columns([
                        shopping_carts::Column::UserId,
                        shopping_carts::Column::RecipeId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
        }
        .with_context(|| format!("add recipe to {}", list.label()))?;
        Ok(inserted > 0)
    }

    async fn remove(
        &self,
        list: RecipeList,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let result = match list {
            RecipeList::Favorites => {
                favorites::Entity::delete_by_id((user_id, recipe_id))
                    .exec(&self.db)
                    .await
            }
            RecipeList::ShoppingCart => {
                shopping_carts::Entity::delete_by_id((user_id, recipe_id))
                    .exec(&self.db)
                    .await
            }
        }
        .with_context(|| format!("remove recipe from {}", list.label()))?;
        Ok(result.rows_affected > 0)
    }

    async fn contained(
        &self,
        list: RecipeList,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        if recipe_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let ids = recipe_ids.iter().copied();
        let found: Vec<i32> = match list {
            RecipeList::Favorites => {
                favorites::Entity::find()
                    .select_only()
                    .column(favorites::Column::RecipeId)
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.is_in(ids))
                    .into_tuple()
                    .all(&self.db)
                    .await
            }
            RecipeList::ShoppingCart => {
                shopping_carts::Entity::find()
                    .select_only()
                    .column(shopping_carts::Column::RecipeId)
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.is_in(ids))
                    .into_tuple()
                    .all(&self.db)
                    .await
            }
        }
        .with_context(|| format!("check {} membership", list.label()))?;
        Ok(found.into_iter().collect())
    }

    async fn recipe_ids(
        &self,
        list: RecipeList,
        user_id: Uuid,
    ) -> Result<Vec<i32>, RecipesServiceError> {
        let ids: Vec<i32> = match list {
            RecipeList::Favorites => {
                favorites::Entity::find()
                    .select_only()
                    .column(favorites::Column::RecipeId)
                    .filter(favorites::Column::UserId.eq(user_id))
                    .order_by_asc(favorites::Column::CreatedAt)
                    .into_tuple()
                    .all(&self.db)
                    .await
            }
            RecipeList::ShoppingCart => {
                shopping_carts::Entity::find()
                    .select_only()
                    .column(shopping_carts::Column::RecipeId)
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .order_by_asc(shopping_carts::Column::CreatedAt)
                    .into_tuple()
                    .all(&self.db)
                    .await
            }
        }
        .with_context(|| format!("list {} recipe ids", list.label()))?;
        Ok(ids)
    }
}

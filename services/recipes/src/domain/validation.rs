//! Write-side recipe payload and its field validators.

use std::collections::HashSet;

use serde::Deserialize;

use foodgram_core::error::FieldErrors;

use crate::domain::image::DecodedImage;
use crate::domain::types::{IngredientLine, RecipeAssociations};

pub const RECIPE_NAME_MAX_LEN: usize = 200;

/// `{id, amount}` entry of a submitted recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IngredientAmountInput {
    pub id: i32,
    pub amount: i32,
}

/// Recipe body accepted by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecipeWriteRequest {
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmountInput>,
    #[serde(default)]
    pub image: Option<String>,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRequirement {
    Required,
    Optional,
}

/// A recipe body that passed every field validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecipe {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: Option<DecodedImage>,
    pub associations: RecipeAssociations,
}

fn first_duplicate<T: Copy + Eq + std::hash::Hash>(items: impl IntoIterator<Item = T>) -> Option<T> {
    let mut seen = HashSet::new();
    items.into_iter().find(|item| !seen.insert(*item))
}

pub fn validate_tags(tags: &[i32], errors: &mut FieldErrors) {
    if tags.is_empty() {
        errors.add("tags", "at least one tag is required");
    } else if let Some(id) = first_duplicate(tags.iter().copied()) {
        errors.add("tags", format!("tags must be unique, {id} is repeated"));
    }
}

pub fn validate_ingredients(ingredients: &[IngredientAmountInput], errors: &mut FieldErrors) {
    if ingredients.is_empty() {
        errors.add("ingredients", "at least one ingredient is required");
        return;
    }
    if let Some(id) = first_duplicate(ingredients.iter().map(|line| line.id)) {
        errors.add(
            "ingredients",
            format!("ingredients must be unique, {id} is repeated"),
        );
    }
    for line in ingredients.iter().filter(|line| line.amount <= 0) {
        errors.add(
            "ingredients",
            format!("amount of ingredient {} must be greater than 0", line.id),
        );
    }
}

pub fn validate_cooking_time(cooking_time: i32, errors: &mut FieldErrors) {
    if cooking_time <= 0 {
        errors.add("cooking_time", "cooking time must be greater than 0");
    }
}

/// `name` is measured as stored, after trimming.
fn validate_text_fields(name: &str, text: &str, errors: &mut FieldErrors) {
    let name = name.trim();
    if name.is_empty() {
        errors.add("name", "name must not be blank");
    } else if name.chars().count() > RECIPE_NAME_MAX_LEN {
        errors.add(
            "name",
            format!("name must be at most {RECIPE_NAME_MAX_LEN} characters"),
        );
    }
    if text.trim().is_empty() {
        errors.add("text", "text must not be blank");
    }
}

fn validate_image(
    image: Option<&str>,
    requirement: ImageRequirement,
    errors: &mut FieldErrors,
) -> Option<DecodedImage> {
    match (image, requirement) {
        (None, ImageRequirement::Required) => {
            errors.add("image", "image is required");
            None
        }
        (None, ImageRequirement::Optional) => None,
        (Some(uri), _) => match DecodedImage::from_data_uri(uri) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                errors.add("image", e.to_string());
                None
            }
        },
    }
}

/// Report ids of `field` that are absent from `existing`.
pub fn validate_references(
    field: &str,
    noun: &str,
    ids: impl IntoIterator<Item = i32>,
    existing: &HashSet<i32>,
    errors: &mut FieldErrors,
) {
    for id in ids.into_iter().filter(|id| !existing.contains(id)) {
        errors.add(field, format!("unknown {noun} id {id}"));
    }
}

impl RecipeWriteRequest {
    /// Run every field validator and collect all failures.
    pub fn validate(self, image: ImageRequirement) -> Result<ValidatedRecipe, FieldErrors> {
        let mut errors = FieldErrors::new();
        validate_tags(&self.tags, &mut errors);
        validate_ingredients(&self.ingredients, &mut errors);
        validate_cooking_time(self.cooking_time, &mut errors);
        validate_text_fields(&self.name, &self.text, &mut errors);
        let decoded = validate_image(self.image.as_deref(), image, &mut errors);
        errors.into_result()?;

        Ok(ValidatedRecipe {
            name: self.name.trim().to_owned(),
            text: self.text,
            cooking_time: self.cooking_time,
            image: decoded,
            associations: RecipeAssociations {
                tag_ids: self.tags,
                ingredients: self
                    .ingredients
                    .into_iter()
                    .map(|line| IngredientLine {
                        ingredient_id: line.id,
                        amount: line.amount,
                    })
                    .collect(),
            },
        })
    }
}

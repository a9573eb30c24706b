//! Bulk import of the ingredient and tag catalogs.

use anyhow::{Context as _, Result};
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, EntityTrait, TransactionTrait, sea_query::OnConflict,
};
use serde::Deserialize;

use foodgram_domain::tag::{HexColor, Slug, TAG_FIELD_MAX_LEN};
use foodgram_recipes_schema::{ingredients, tags};

/// Column width of `ingredients.name` and `ingredients.measurement_unit`.
pub const INGREDIENT_FIELD_MAX_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngredientRecord {
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagRecord {
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// A tag record whose colour and slug passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTag {
    pub name: String,
    pub color: HexColor,
    pub slug: Slug,
}

impl TagRecord {
    pub fn validate(self) -> Result<ValidTag> {
        let name = self.name.trim().to_owned();
        anyhow::ensure!(!name.is_empty(), "tag name must not be blank");
        anyhow::ensure!(
            name.chars().count() <= TAG_FIELD_MAX_LEN,
            "tag name {name:?} is longer than {TAG_FIELD_MAX_LEN} characters"
        );
        let color = self
            .color
            .parse::<HexColor>()
            .with_context(|| format!("tag {name:?}"))?;
        let slug = self
            .slug
            .parse::<Slug>()
            .with_context(|| format!("tag {name:?}"))?;
        Ok(ValidTag { name, color, slug })
    }
}

impl IngredientRecord {
    /// Trimmed copy that fits the `ingredients` columns.
    pub fn validate(self, index: usize) -> Result<IngredientRecord> {
        let name = self.name.trim().to_owned();
        let measurement_unit = self.measurement_unit.trim().to_owned();
        anyhow::ensure!(
            !name.is_empty() && !measurement_unit.is_empty(),
            "ingredient #{index} has a blank name or measurement unit"
        );
        for (field, value) in [("name", &name), ("measurement unit", &measurement_unit)] {
            anyhow::ensure!(
                value.chars().count() <= INGREDIENT_FIELD_MAX_LEN,
                "ingredient #{index} {field} {value:?} is longer than {INGREDIENT_FIELD_MAX_LEN} characters"
            );
        }
        Ok(IngredientRecord {
            name,
            measurement_unit,
        })
    }
}

pub fn parse_ingredients(json: &str) -> Result<Vec<IngredientRecord>> {
    let records: Vec<IngredientRecord> =
        serde_json::from_str(json).context("parse ingredients file")?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.validate(index))
        .collect()
}

pub fn parse_tags(json: &str) -> Result<Vec<ValidTag>> {
    let records: Vec<TagRecord> = serde_json::from_str(json).context("parse tags file")?;
    records.into_iter().map(TagRecord::validate).collect()
}

/// Insert ingredients, skipping `(name, measurement_unit)` pairs that already exist.
/// Returns the number of inserted rows.
pub async fn load_ingredients<C>(db: &C, records: &[IngredientRecord]) -> Result<u64>
where
    C: ConnectionTrait + TransactionTrait,
{
    if records.is_empty() {
        return Ok(0);
    }
    let rows: Vec<ingredients::ActiveModel> = records
        .iter()
        .map(|record| ingredients::ActiveModel {
            name: Set(record.name.trim().to_owned()),
            measurement_unit: Set(record.measurement_unit.trim().to_owned()),
            ..Default::default()
        })
        .collect();
    let txn = db.begin().await.context("begin ingredient import")?;
    let mut inserted = 0;
    for chunk in rows.chunks(500) {
        inserted += ingredients::Entity::insert_many(chunk.to_vec())
            .on_conflict(
                OnConflict::columns([
                    ingredients::Column::Name,
                    ingredients::Column::MeasurementUnit,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .context("insert ingredients")?;
    }
    txn.commit().await.context("commit ingredient import")?;
    Ok(inserted)
}

/// Insert tags, skipping any that collide with an existing name, colour or slug.
pub async fn load_tags<C: ConnectionTrait>(db: &C, records: &[ValidTag]) -> Result<u64> {
    let mut inserted = 0;
    for record in records {
        inserted += tags::Entity::insert(tags::ActiveModel {
            name: Set(record.name.clone()),
            color: Set(record.color.as_str().to_owned()),
            slug: Set(record.slug.as_str().to_owned()),
            ..Default::default()
        })
        .on_conflict(OnConflict::new().do_nothing().to_owned())
        .exec_without_returning(db)
        .await
        .with_context(|| format!("insert tag {:?}", record.name))?;
    }
    Ok(inserted)
}

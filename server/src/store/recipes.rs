use chrono::{NaiveDateTime, Utc};
use cookbook_core::{title_keywords, Ingredient, Instruction, RecipeDraft};
use diesel::prelude::*;
use uuid::Uuid;

use super::StoreError;
use crate::models::{DbUuid, NewRecipe, Recipe};
use crate::schema::recipes;

/// A recipe as read back from the store, with its JSON columns decoded.
#[derive(Debug, Clone)]
pub struct RecipeDocument {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub servings: u32,
    pub prep_time: u32,
    pub cook_time: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    pub photo_id: Option<Uuid>,
    pub keywords: Vec<String>,
    pub created_at: NaiveDateTime,
}

impl RecipeDocument {
    /// True when every query keyword is one of the title keywords.
    pub fn matches(&self, query: &[String]) -> bool {
        query.iter().all(|word| self.keywords.contains(word))
    }
}

impl TryFrom<Recipe> for RecipeDocument {
    type Error = StoreError;

    fn try_from(row: Recipe) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.into(),
            owner: row.user_id.into(),
            title: row.title,
            servings: non_negative(row.servings, "servings")?,
            prep_time: non_negative(row.prep_time, "prep_time")?,
            cook_time: non_negative(row.cook_time, "cook_time")?,
            ingredients: serde_json::from_str(&row.ingredients)?,
            instructions: serde_json::from_str(&row.instructions)?,
            photo_id: row.photo_id.map(Uuid::from),
            keywords: serde_json::from_str(&row.keywords)?,
            created_at: row.created_at,
        })
    }
}

fn non_negative(value: i32, column: &'static str) -> Result<u32, StoreError> {
    u32::try_from(value).map_err(|_| StoreError::OutOfRange(column))
}

fn to_column(value: u32, column: &'static str) -> Result<i32, StoreError> {
    i32::try_from(value).map_err(|_| StoreError::OutOfRange(column))
}

/// Insert a validated draft for `owner` and return the new recipe's id.
pub fn insert(
    conn: &mut SqliteConnection,
    owner: DbUuid,
    draft: &RecipeDraft,
    photo_id: Option<DbUuid>,
) -> Result<Uuid, StoreError> {
    let ingredients = serde_json::to_string(&draft.ingredients)?;
    let instructions = serde_json::to_string(&draft.instructions)?;
    let keywords = serde_json::to_string(&title_keywords(&draft.title))?;

    let id = DbUuid::new_v4();
    let new_recipe = NewRecipe {
        id,
        user_id: owner,
        title: draft.title.trim(),
        servings: to_column(draft.servings, "servings")?,
        prep_time: to_column(draft.prep_time, "prep_time")?,
        cook_time: to_column(draft.cook_time, "cook_time")?,
        ingredients: &ingredients,
        instructions: &instructions,
        photo_id,
        keywords: &keywords,
        created_at: Utc::now().naive_utc(),
    };

    diesel::insert_into(recipes::table)
        .values(&new_recipe)
        .execute(conn)?;

    Ok(id.into())
}

/// All of `owner`'s recipes, newest first.
pub fn list_for_owner(
    conn: &mut SqliteConnection,
    owner: DbUuid,
) -> Result<Vec<RecipeDocument>, StoreError> {
    let rows: Vec<Recipe> = recipes::table
        .filter(recipes::user_id.eq(owner))
        .order((recipes::created_at.desc(), recipes::id.desc()))
        .select(Recipe::as_select())
        .load(conn)?;

    rows.into_iter().map(RecipeDocument::try_from).collect()
}

/// A single recipe, or `None` if it doesn't exist or belongs to someone else.
pub fn get_for_owner(
    conn: &mut SqliteConnection,
    id: DbUuid,
    owner: DbUuid,
) -> Result<Option<RecipeDocument>, StoreError> {
    let row: Option<Recipe> = recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::user_id.eq(owner))
        .select(Recipe::as_select())
        .first(conn)
        .optional()?;

    row.map(RecipeDocument::try_from).transpose()
}

use crate::database::RecipeRepository;
use crate::domain::{NewRecipe, RecipeDetail};
use crate::features::recipes::model::{DbIngredientLine, DbInstruction, DbRecipe};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;

const SELECT_RECIPE: &str = r#"
    SELECT
        r.recipe_id, r.title, r.description, r.image_url,
        r.cuisine_id, r.goal_id, r.DietaryInformation_id, r.AllergiesInformation_id,
        r.user_id, r.created_at,
        c.name AS cuisine_name,
        g.name AS goal_name,
        d.name AS diet_name,
        a.name AS allergy_name
    FROM Recipes r
    LEFT JOIN Cuisines c ON r.cuisine_id = c.cuisine_id
    LEFT JOIN Goals g ON r.goal_id = g.goal_id
    LEFT JOIN DietaryInformation d ON r.DietaryInformation_id = d.diet_id
    LEFT JOIN AllergiesInformation a ON r.AllergiesInformation_id = a.allergy_id
    WHERE r.recipe_id = ?
"#;

const SELECT_INGREDIENTS: &str = r#"
    SELECT i.ingredient_id, i.name, i.unit, ri.quantity
    FROM RecipeIngredients ri
    JOIN Ingredients i ON ri.ingredient_id = i.ingredient_id
    WHERE ri.recipe_id = ?
    ORDER BY ri.rowid
"#;

const SELECT_INSTRUCTIONS: &str = r#"
    SELECT instruction_id, step_number, description
    FROM RecipeInstructions
    WHERE recipe_id = ?
    ORDER BY step_number, instruction_id
"#;

const INSERT_RECIPE: &str = r#"
    INSERT INTO Recipes (
        title, description, image_url, cuisine_id, goal_id,
        DietaryInformation_id, AllergiesInformation_id, user_id
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
"#;

// the no-op update makes RETURNING hand back the id of an existing row,
// the first unit recorded for a name wins
const UPSERT_INGREDIENT: &str = r#"
    INSERT INTO Ingredients (name, unit)
    VALUES (?, ?)
    ON CONFLICT(name) DO UPDATE SET name = excluded.name
    RETURNING ingredient_id
"#;

const INSERT_RECIPE_INGREDIENT: &str = r#"
    INSERT INTO RecipeIngredients (recipe_id, ingredient_id, quantity)
    VALUES (?, ?, ?)
"#;

const INSERT_INSTRUCTION: &str = r#"
    INSERT INTO RecipeInstructions (recipe_id, step_number, description)
    VALUES (?, ?, ?)
"#;

/// Opens a pool on `database_url` with foreign keys enforced, creating the file if needed.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<Pool<Sqlite>> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database url {}", database_url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(10));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to create pool on {}", database_url))
}

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for SqliteRepository {
    async fn get_recipe_detail(&self, recipe_id: i64) -> Result<Option<RecipeDetail>> {
        // all three reads go through the same connection
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire a connection")?;

        let db_recipe_opt = sqlx::query_as::<_, DbRecipe>(SELECT_RECIPE)
            .bind(recipe_id)
            .fetch_optional(&mut *conn)
            .await
            .context(format!("Failed to load recipe {}", recipe_id))?;

        let db_recipe = match db_recipe_opt {
            Some(row) => row,
            None => return Ok(None),
        };

        let ingredients = sqlx::query_as::<_, DbIngredientLine>(SELECT_INGREDIENTS)
            .bind(recipe_id)
            .fetch_all(&mut *conn)
            .await
            .context(format!("Failed to load ingredients of recipe {}", recipe_id))?;

        let instructions = sqlx::query_as::<_, DbInstruction>(SELECT_INSTRUCTIONS)
            .bind(recipe_id)
            .fetch_all(&mut *conn)
            .await
            .context(format!("Failed to load instructions of recipe {}", recipe_id))?;

        Ok(Some(RecipeDetail {
            recipe: db_recipe.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            instructions: instructions.into_iter().map(Into::into).collect(),
        }))
    }

    async fn create_recipe(&self, user_id: i64, recipe: &NewRecipe) -> Result<i64> {
        // dropping the transaction before commit rolls everything back
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let recipe_id = sqlx::query(INSERT_RECIPE)
            .bind(&recipe.title)
            .bind(&recipe.description)
            .bind(&recipe.image_url)
            .bind(recipe.cuisine_id)
            .bind(recipe.goal_id)
            .bind(recipe.dietary_information_id)
            .bind(recipe.allergies_information_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .context("Failed to insert recipe")?
            .last_insert_rowid();

        for ingredient in &recipe.ingredients {
            let ingredient_id: i64 = sqlx::query_scalar(UPSERT_INGREDIENT)
                .bind(&ingredient.name)
                .bind(&ingredient.unit)
                .fetch_one(&mut *tx)
                .await
                .context(format!("Failed to upsert ingredient {}", ingredient))?;

            sqlx::query(INSERT_RECIPE_INGREDIENT)
                .bind(recipe_id)
                .bind(ingredient_id)
                .bind(ingredient.quantity)
                .execute(&mut *tx)
                .await
                .context(format!("Failed to link ingredient {}", ingredient))?;
        }

        for step in &recipe.instructions {
            sqlx::query(INSERT_INSTRUCTION)
                .bind(recipe_id)
                .bind(step.step_number)
                .bind(&step.description)
                .execute(&mut *tx)
                .await
                .context(format!("Failed to insert instruction step {}", step.step_number))?;
        }

        tx.commit().await.context("Failed to commit recipe")?;

        tracing::info!(
            recipe_id,
            user_id,
            ingredients = recipe.ingredients.len(),
            instructions = recipe.instructions.len(),
            "Created recipe"
        );

        Ok(recipe_id)
    }
}

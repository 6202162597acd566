use crate::domain::{NewRecipe, RecipeDetail};
use anyhow::Result;
use async_trait::async_trait;

pub mod sqlite;

// a recipe repository is shared between request handlers behind an Arc
// sqlx::Pool is thread safe
// db specific implementations live next to this file ("sqlite.rs")
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Loads a recipe with its lookup names, ingredient lines and ordered instructions.
    async fn get_recipe_detail(&self, recipe_id: i64) -> Result<Option<RecipeDetail>>;

    /// Creates a recipe owned by `user_id` along with its children, returning the new id.
    /// Either everything is written or nothing is.
    async fn create_recipe(&self, user_id: i64, recipe: &NewRecipe) -> Result<i64>;
}

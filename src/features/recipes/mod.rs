pub mod model;

use crate::AppState;
use crate::auth::AuthUser;
use crate::domain::NewRecipe;
use crate::error::ApiError;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use model::{CreateRecipeRequest, RecipeCreatedResponse, RecipeResponse};

pub fn recipes_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_recipe_handler))
        .route("/{id}", get(get_recipe_handler))
}

async fn get_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, ApiError> {
    // an id that can't be a recipe id is treated like a missing recipe
    let recipe_id: i64 = id.parse().map_err(|_| ApiError::NotFound)?;

    match state.repo.get_recipe_detail(recipe_id).await {
        Err(e) => {
            tracing::error!("Failed to read recipe {}: {:#}", recipe_id, e);
            Err(ApiError::Internal(e))
        }

        Ok(None) => Err(ApiError::NotFound),

        Ok(Some(detail)) => {
            tracing::debug!("Serving {}", detail.recipe);
            Ok(Json(detail.into()))
        }
    }
}

async fn create_recipe_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeCreatedResponse>), ApiError> {
    let new_recipe: NewRecipe = payload.into();

    let recipe_id = state
        .repo
        .create_recipe(user.user_id, &new_recipe)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create recipe for user {}: {:#}", user.user_id, e);
            ApiError::CreationFailed(format!("{:#}", e))
        })?;

    Ok((
        StatusCode::CREATED,
        Json(RecipeCreatedResponse::new(recipe_id)),
    ))
}

use crate::domain::{
    IngredientLine, InstructionStep, NewIngredient, NewInstruction, NewRecipe, Recipe,
    RecipeDetail,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const CREATED_MESSAGE: &str = "Recette créée !";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// rows as they come out of sqlite

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct DbRecipe {
    pub recipe_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub cuisine_id: Option<i64>,
    pub goal_id: Option<i64>,
    #[sqlx(rename = "DietaryInformation_id")]
    pub dietary_information_id: Option<i64>,
    #[sqlx(rename = "AllergiesInformation_id")]
    pub allergies_information_id: Option<i64>,
    pub user_id: i64,
    pub created_at: NaiveDateTime,
    pub cuisine_name: Option<String>,
    pub goal_name: Option<String>,
    pub diet_name: Option<String>,
    pub allergy_name: Option<String>,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct DbIngredientLine {
    pub ingredient_id: i64,
    pub name: String,
    pub unit: Option<String>,
    pub quantity: Option<f64>,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct DbInstruction {
    pub instruction_id: i64,
    pub step_number: i64,
    pub description: String,
}

impl From<DbRecipe> for Recipe {
    fn from(row: DbRecipe) -> Self {
        Recipe {
            recipe_id: row.recipe_id,
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            cuisine_id: row.cuisine_id,
            goal_id: row.goal_id,
            dietary_information_id: row.dietary_information_id,
            allergies_information_id: row.allergies_information_id,
            user_id: row.user_id,
            created_at: row.created_at,
            cuisine_name: row.cuisine_name,
            goal_name: row.goal_name,
            diet_name: row.diet_name,
            allergy_name: row.allergy_name,
        }
    }
}

impl From<DbIngredientLine> for IngredientLine {
    fn from(row: DbIngredientLine) -> Self {
        IngredientLine {
            ingredient_id: row.ingredient_id,
            name: row.name,
            unit: row.unit,
            quantity: row.quantity,
        }
    }
}

impl From<DbInstruction> for InstructionStep {
    fn from(row: DbInstruction) -> Self {
        InstructionStep {
            instruction_id: row.instruction_id,
            step_number: row.step_number,
            description: row.description,
        }
    }
}

// request bodies

#[derive(Deserialize, Debug, Default)]
pub struct CreateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub cuisine_id: Option<i64>,
    pub goal_id: Option<i64>,
    #[serde(rename = "DietaryInformation_id")]
    pub dietary_information_id: Option<i64>,
    #[serde(rename = "AllergiesInformation_id")]
    pub allergies_information_id: Option<i64>,
    pub ingredients: Option<Vec<JsonNewIngredient>>,
    pub instructions: Option<Vec<JsonNewInstruction>>,
}

#[derive(Deserialize, Debug)]
pub struct JsonNewIngredient {
    pub name: String,
    pub unit: Option<String>,
    pub quantity: Option<f64>,
}

#[derive(Deserialize, Debug)]
pub struct JsonNewInstruction {
    pub step_number: i64,
    pub description: String,
}

impl From<CreateRecipeRequest> for NewRecipe {
    fn from(request: CreateRecipeRequest) -> Self {
        let ingredients = request
            .ingredients
            .unwrap_or_default()
            .into_iter()
            .map(|i| NewIngredient {
                name: i.name,
                unit: i.unit,
                quantity: i.quantity,
            })
            .collect();

        let instructions = request
            .instructions
            .unwrap_or_default()
            .into_iter()
            .map(|s| NewInstruction {
                step_number: s.step_number,
                description: s.description,
            })
            .collect();

        NewRecipe {
            title: request.title,
            description: request.description,
            image_url: request.image_url,
            cuisine_id: request.cuisine_id,
            goal_id: request.goal_id,
            dietary_information_id: request.dietary_information_id,
            allergies_information_id: request.allergies_information_id,
            ingredients,
            instructions,
        }
    }
}

// response bodies

#[derive(Serialize, Debug)]
pub struct JsonRecipeDetail {
    pub recipe_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub cuisine_id: Option<i64>,
    pub goal_id: Option<i64>,
    #[serde(rename = "DietaryInformation_id")]
    pub dietary_information_id: Option<i64>,
    #[serde(rename = "AllergiesInformation_id")]
    pub allergies_information_id: Option<i64>,
    pub user_id: i64,
    pub created_at: String,
    pub cuisine_name: Option<String>,
    pub goal_name: Option<String>,
    pub diet_name: Option<String>,
    pub allergy_name: Option<String>,
    pub ingredients: Vec<JsonIngredientLine>,
    pub instructions: Vec<JsonInstruction>,
}

#[derive(Serialize, Debug)]
pub struct JsonIngredientLine {
    pub ingredient_id: i64,
    pub name: String,
    pub unit: Option<String>,
    pub quantity: Option<f64>,
}

#[derive(Serialize, Debug)]
pub struct JsonInstruction {
    pub instruction_id: i64,
    pub step_number: i64,
    pub description: String,
}

#[derive(Serialize, Debug)]
pub struct RecipeResponse {
    pub success: bool,
    pub data: JsonRecipeDetail,
}

#[derive(Serialize, Debug)]
pub struct RecipeCreatedResponse {
    pub success: bool,
    pub message: String,
    pub recipe_id: i64,
}

impl RecipeCreatedResponse {
    pub fn new(recipe_id: i64) -> Self {
        Self {
            success: true,
            message: CREATED_MESSAGE.to_string(),
            recipe_id,
        }
    }
}

impl From<RecipeDetail> for RecipeResponse {
    fn from(detail: RecipeDetail) -> Self {
        let recipe = detail.recipe;

        let ingredients = detail
            .ingredients
            .into_iter()
            .map(|line| JsonIngredientLine {
                ingredient_id: line.ingredient_id,
                name: line.name,
                unit: line.unit,
                quantity: line.quantity,
            })
            .collect();

        let instructions = detail
            .instructions
            .into_iter()
            .map(|step| JsonInstruction {
                instruction_id: step.instruction_id,
                step_number: step.step_number,
                description: step.description,
            })
            .collect();

        RecipeResponse {
            success: true,
            data: JsonRecipeDetail {
                recipe_id: recipe.recipe_id,
                title: recipe.title,
                description: recipe.description,
                image_url: recipe.image_url,
                cuisine_id: recipe.cuisine_id,
                goal_id: recipe.goal_id,
                dietary_information_id: recipe.dietary_information_id,
                allergies_information_id: recipe.allergies_information_id,
                user_id: recipe.user_id,
                created_at: recipe.created_at.format(DATETIME_FORMAT).to_string(),
                cuisine_name: recipe.cuisine_name,
                goal_name: recipe.goal_name,
                diet_name: recipe.diet_name,
                allergy_name: recipe.allergy_name,
                ingredients,
                instructions,
            },
        }
    }
}

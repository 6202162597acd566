use chrono::NaiveDateTime;
use derive_more::derive::Display;

// a recipe row, enriched with the names of its lookup entries
#[derive(Debug, Clone, PartialEq, Display)]
#[display("recipe {} ({})", recipe_id, title)]
pub struct Recipe {
    pub recipe_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub cuisine_id: Option<i64>,
    pub goal_id: Option<i64>,
    pub dietary_information_id: Option<i64>,
    pub allergies_information_id: Option<i64>,
    pub user_id: i64,
    pub created_at: NaiveDateTime,
    pub cuisine_name: Option<String>,
    pub goal_name: Option<String>,
    pub diet_name: Option<String>,
    pub allergy_name: Option<String>,
}

// one catalog ingredient as used by a recipe
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLine {
    pub ingredient_id: i64,
    pub name: String,
    pub unit: Option<String>,
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionStep {
    pub instruction_id: i64,
    pub step_number: i64,
    pub description: String,
}

/// A recipe with its ingredient lines and its instructions, sorted by step number.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub ingredients: Vec<IngredientLine>,
    pub instructions: Vec<InstructionStep>,
}

/// Everything needed to create a recipe, minus the owner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewRecipe {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub cuisine_id: Option<i64>,
    pub goal_id: Option<i64>,
    pub dietary_information_id: Option<i64>,
    pub allergies_information_id: Option<i64>,
    pub ingredients: Vec<NewIngredient>,
    pub instructions: Vec<NewInstruction>,
}

#[derive(Debug, Clone, PartialEq, Display)]
#[display("{}", name)]
pub struct NewIngredient {
    pub name: String,
    pub unit: Option<String>,
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInstruction {
    pub step_number: i64,
    pub description: String,
}

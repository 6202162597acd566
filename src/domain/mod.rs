mod recipe;

pub use recipe::{
    IngredientLine, InstructionStep, NewIngredient, NewInstruction, NewRecipe, Recipe,
    RecipeDetail,
};

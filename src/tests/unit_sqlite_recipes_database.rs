use crate::database::RecipeRepository;
use crate::database::sqlite::{SqliteRepository, connect};
use crate::domain::{NewIngredient, NewInstruction, NewRecipe};
use sqlx::{Pool, Sqlite};

// create a sqlite database in memory to test against
async fn setup_test_db() -> (SqliteRepository, Pool<Sqlite>) {
    // a single connection, otherwise every connection gets its own empty database
    let pool = connect("sqlite::memory:", 1)
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    (SqliteRepository::new(pool.clone()), pool)
}

async fn count_rows(pool: &Pool<Sqlite>, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

fn ingredient(name: &str, unit: &str, quantity: f64) -> NewIngredient {
    NewIngredient {
        name: name.to_string(),
        unit: Some(unit.to_string()),
        quantity: Some(quantity),
    }
}

fn step(step_number: i64, description: &str) -> NewInstruction {
    NewInstruction {
        step_number,
        description: description.to_string(),
    }
}

fn soup() -> NewRecipe {
    NewRecipe {
        title: Some("Soup".to_string()),
        description: Some("A warm soup".to_string()),
        image_url: Some("https://img.example/soup.png".to_string()),
        cuisine_id: Some(1),
        goal_id: Some(3),
        dietary_information_id: Some(2),
        allergies_information_id: Some(1),
        ingredients: vec![ingredient("Salt", "g", 5.0), ingredient("Water", "ml", 750.0)],
        instructions: vec![step(1, "Boil water"), step(2, "Add salt")],
    }
}

// test the database's ability to save a recipe and read it back enriched
#[tokio::test]
async fn test_sqlite_create_and_read_recipe() {
    let (repo, _pool) = setup_test_db().await;

    let recipe_id = repo.create_recipe(42, &soup()).await.expect("Should create");
    let detail = repo
        .get_recipe_detail(recipe_id)
        .await
        .expect("Should query")
        .expect("Should find recipe");

    assert_eq!(detail.recipe.title, "Soup");
    assert_eq!(detail.recipe.user_id, 42);
    // lookup names come from the seeded tables
    assert_eq!(detail.recipe.cuisine_name.as_deref(), Some("French"));
    assert_eq!(detail.recipe.goal_name.as_deref(), Some("Maintenance"));
    assert_eq!(detail.recipe.diet_name.as_deref(), Some("Vegan"));
    assert_eq!(detail.recipe.allergy_name.as_deref(), Some("Nuts"));

    let names: Vec<&str> = detail.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Salt", "Water"]);
    assert_eq!(detail.ingredients[0].unit.as_deref(), Some("g"));
    assert_eq!(detail.ingredients[0].quantity, Some(5.0));

    assert_eq!(detail.instructions.len(), 2);
    assert_eq!(detail.instructions[0].description, "Boil water");
}

// a recipe without lookups or children still reads back, with empty lists
#[tokio::test]
async fn test_sqlite_minimal_recipe() {
    let (repo, _pool) = setup_test_db().await;

    let recipe = NewRecipe {
        title: Some("Toast".to_string()),
        ..Default::default()
    };
    let recipe_id = repo.create_recipe(1, &recipe).await.unwrap();
    let detail = repo.get_recipe_detail(recipe_id).await.unwrap().unwrap();

    assert!(detail.recipe.cuisine_name.is_none());
    assert!(detail.recipe.allergy_name.is_none());
    assert!(detail.ingredients.is_empty());
    assert!(detail.instructions.is_empty());
}

#[tokio::test]
async fn test_sqlite_missing_recipe() {
    let (repo, _pool) = setup_test_db().await;

    let retrieved = repo.get_recipe_detail(9999).await.unwrap();
    assert!(retrieved.is_none());
}

// instructions always come back sorted by step number, whatever the insert order
#[tokio::test]
async fn test_sqlite_instructions_sorted_by_step() {
    let (repo, _pool) = setup_test_db().await;

    let mut recipe = soup();
    recipe.instructions = vec![step(3, "Serve"), step(1, "Boil water"), step(2, "Add salt")];
    let recipe_id = repo.create_recipe(1, &recipe).await.unwrap();

    let detail = repo.get_recipe_detail(recipe_id).await.unwrap().unwrap();
    let steps: Vec<i64> = detail.instructions.iter().map(|s| s.step_number).collect();
    assert_eq!(steps, vec![1, 2, 3]);
    assert_eq!(detail.instructions[2].description, "Serve");
}

// the same ingredient name across two recipes maps to one catalog row
#[tokio::test]
async fn test_sqlite_catalog_reuse_across_recipes() {
    let (repo, pool) = setup_test_db().await;

    let first = repo.create_recipe(1, &soup()).await.unwrap();

    let mut second = soup();
    second.title = Some("Salted water".to_string());
    // a different unit for an existing name doesn't replace the catalog entry
    second.ingredients = vec![ingredient("Salt", "kg", 1.0)];
    let second = repo.create_recipe(2, &second).await.unwrap();

    let salt_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Ingredients WHERE name = 'Salt'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(salt_rows, 1);
    assert_eq!(count_rows(&pool, "Ingredients").await, 2);

    let first = repo.get_recipe_detail(first).await.unwrap().unwrap();
    let second = repo.get_recipe_detail(second).await.unwrap().unwrap();
    assert_eq!(first.ingredients[0].ingredient_id, second.ingredients[0].ingredient_id);
    assert_eq!(second.ingredients[0].unit.as_deref(), Some("g"));
    assert_eq!(second.ingredients[0].quantity, Some(1.0));
}

// the number of ingredient lines equals the number of join rows, repeats included
#[tokio::test]
async fn test_sqlite_ingredient_count_matches_join_rows() {
    let (repo, pool) = setup_test_db().await;

    let mut recipe = soup();
    recipe.ingredients.push(ingredient("Salt", "g", 2.0));
    let recipe_id = repo.create_recipe(1, &recipe).await.unwrap();

    let join_rows: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM RecipeIngredients WHERE recipe_id = ?")
            .bind(recipe_id)
            .fetch_one(&pool)
            .await
            .unwrap();

    let detail = repo.get_recipe_detail(recipe_id).await.unwrap().unwrap();
    assert_eq!(join_rows, 3);
    assert_eq!(detail.ingredients.len() as i64, join_rows);
}

// an unknown lookup id fails the insert and leaves nothing behind
#[tokio::test]
async fn test_sqlite_invalid_foreign_key_writes_nothing() {
    let (repo, pool) = setup_test_db().await;

    let mut recipe = soup();
    recipe.cuisine_id = Some(999);
    let result = repo.create_recipe(1, &recipe).await;

    assert!(result.is_err(), "Should fail due to foreign key constraint");
    assert_eq!(count_rows(&pool, "Recipes").await, 0);
    assert_eq!(count_rows(&pool, "Ingredients").await, 0);
    assert_eq!(count_rows(&pool, "RecipeIngredients").await, 0);
    assert_eq!(count_rows(&pool, "RecipeInstructions").await, 0);
}

#[tokio::test]
async fn test_sqlite_missing_title_is_rejected() {
    let (repo, pool) = setup_test_db().await;

    let mut recipe = soup();
    recipe.title = None;
    let err = repo.create_recipe(1, &recipe).await.unwrap_err();

    assert!(format!("{:#}", err).contains("NOT NULL"));
    assert_eq!(count_rows(&pool, "Recipes").await, 0);
}

// a failing child insert rolls back the recipe row and the catalog entries created before it
#[tokio::test]
async fn test_sqlite_child_failure_rolls_back() {
    let (repo, pool) = setup_test_db().await;

    sqlx::query(
        r#"
        CREATE TRIGGER reject_negative_steps BEFORE INSERT ON RecipeInstructions
        WHEN NEW.step_number < 0
        BEGIN
            SELECT RAISE(ABORT, 'negative step number');
        END
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let mut recipe = soup();
    recipe.ingredients = vec![ingredient("Saffron", "g", 0.1)];
    recipe.instructions = vec![step(1, "Soak"), step(-1, "Broken")];

    let err = repo.create_recipe(1, &recipe).await.unwrap_err();
    assert!(format!("{:#}", err).contains("negative step number"));

    assert_eq!(count_rows(&pool, "Recipes").await, 0);
    assert_eq!(count_rows(&pool, "Ingredients").await, 0);
    assert_eq!(count_rows(&pool, "RecipeIngredients").await, 0);
    assert_eq!(count_rows(&pool, "RecipeInstructions").await, 0);
}

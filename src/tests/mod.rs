mod unit_sqlite_recipes_database;

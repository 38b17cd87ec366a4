// Copyright 2023 Remi Bernotavicius

use crate::database;
use database::models::{Ingredient, Recipe, RecipeId, RecipeIngredient};
use diesel::prelude::OptionalExtension as _;
use diesel::BelongingToDsl as _;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::QueryResult;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

pub struct IngredientLine {
    pub ingredient: Ingredient,
    /// Grams per unit of the recipe's yield.
    pub base_quantity: f64,
}

pub struct RecipeDetail {
    pub recipe: Recipe,
    pub ingredients: Vec<IngredientLine>,
}

pub fn list_recipes(conn: &mut database::Connection) -> QueryResult<Vec<Recipe>> {
    use database::schema::recipes::dsl::*;

    recipes
        .select(Recipe::as_select())
        .order_by(name.asc())
        .load(conn)
}

pub struct CachedQuery<T> {
    query: String,
    results: Vec<T>,
}

/// Recipes whose name contains `query`. Asking for the same query twice in a row doesn't hit the
/// database again.
pub fn search_recipes(
    conn: &mut database::Connection,
    cached_recipe_search: &mut Option<CachedQuery<Recipe>>,
    query: &str,
) -> QueryResult<Vec<Recipe>> {
    if let Some(cached) = cached_recipe_search.as_ref() {
        if cached.query == query {
            return Ok(cached.results.clone());
        }
    }

    use database::schema::recipes::dsl::*;
    use diesel::expression_methods::TextExpressionMethods as _;

    let result = recipes
        .select(Recipe::as_select())
        .filter(name.like(format!("%{query}%")))
        .order_by(name.asc())
        .load(conn)?;

    *cached_recipe_search = Some(CachedQuery {
        query: query.into(),
        results: result.clone(),
    });
    Ok(result)
}

pub fn get_recipe(
    conn: &mut database::Connection,
    recipe_id: RecipeId,
) -> QueryResult<Option<RecipeDetail>> {
    let recipe = {
        use database::schema::recipes::dsl::*;

        recipes
            .select(Recipe::as_select())
            .filter(id.eq(recipe_id))
            .get_result(conn)
            .optional()?
    };
    let Some(recipe) = recipe else {
        return Ok(None);
    };

    let ingredients = RecipeIngredient::belonging_to(&recipe)
        .inner_join(database::schema::ingredients::table)
        .select((RecipeIngredient::as_select(), Ingredient::as_select()))
        .order_by(database::schema::ingredients::name.asc())
        .load(conn)?
        .into_iter()
        .map(|(usage, ingredient): (RecipeIngredient, Ingredient)| IngredientLine {
            ingredient,
            base_quantity: usage.base_quantity,
        })
        .collect();

    Ok(Some(RecipeDetail {
        recipe,
        ingredients,
    }))
}

pub fn recipes_by_ids(
    conn: &mut database::Connection,
    recipe_ids: &[RecipeId],
) -> QueryResult<Vec<Recipe>> {
    use database::schema::recipes::dsl::*;

    recipes
        .select(Recipe::as_select())
        .filter(id.eq_any(recipe_ids.iter().copied()))
        .order_by(name.asc())
        .load(conn)
}

#[test]
fn list_is_sorted() {
    let mut conn = database::test_connection();
    let names: Vec<_> = list_recipes(&mut conn)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names.len(), 8);
    assert_eq!(names, sorted);
}

#[test]
fn search_uses_cache() {
    let mut conn = database::test_connection();
    let mut cache = None;

    let found = search_recipes(&mut conn, &mut cache, "Arroz").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Arroz temperado");
    assert_eq!(found[0].image_ref.as_deref(), Some("arroz.png"));

    {
        use database::schema::recipes::dsl::*;

        diesel::insert_into(recipes)
            .values((name.eq("Arroz doce"), yield_description.eq("6 porções")))
            .execute(&mut conn)
            .unwrap();
    }

    let again = search_recipes(&mut conn, &mut cache, "Arroz").unwrap();
    assert_eq!(again, found);

    let fresh = search_recipes(&mut conn, &mut cache, "Arroz d").unwrap();
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].name, "Arroz doce");
    assert_eq!(fresh[0].image_ref, None);
}

#[test]
fn recipe_detail() {
    let mut conn = database::test_connection();
    let rice = search_recipes(&mut conn, &mut None, "Arroz temperado").unwrap()[0].id;

    let detail = get_recipe(&mut conn, rice).unwrap().unwrap();
    assert_eq!(detail.recipe.yield_description, "4 porções");
    let lines: Vec<_> = detail
        .ingredients
        .iter()
        .map(|l| (l.ingredient.name.as_str(), l.base_quantity))
        .collect();
    assert_eq!(lines, vec![("alho", 10.0), ("arroz", 400.0), ("óleo", 20.0)]);

    assert!(get_recipe(&mut conn, RecipeId(9999)).unwrap().is_none());
}

#[test]
fn lookup_by_ids() {
    let mut conn = database::test_connection();
    let all = list_recipes(&mut conn).unwrap();
    let wanted = [all[0].id, all[3].id];

    let found: Vec<_> = recipes_by_ids(&mut conn, &wanted)
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(found, wanted);
}

// Copyright 2023 Remi Bernotavicius

//! The default catalog every database starts with.

use crate::database;
use database::models::{IngredientId, RecipeId, RecipeIngredient};
use diesel::prelude::Connection as _;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::QueryResult;
use diesel::RunQueryDsl as _;

const INGREDIENTS: &[&str] = &[
    "arroz",
    "alho",
    "óleo",
    "cebola",
    "feijão carioca",
    "carne moída",
    "peito de frango",
    "azeite",
    "macarrão",
    "leite condensado",
    "chocolate em pó",
    "manteiga",
    "cenoura",
    "açúcar",
    "farinha de trigo",
    "ovos",
    "leite",
    "sal",
];

struct SeedRecipe {
    name: &'static str,
    yield_description: &'static str,
    description: &'static str,
    image_ref: &'static str,
    ingredients: &'static [(&'static str, f64)],
}

const RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        name: "Arroz temperado",
        yield_description: "4 porções",
        description: "Arroz branco temperado com alho refogado.",
        image_ref: "arroz.png",
        ingredients: &[("arroz", 400.0), ("alho", 10.0), ("óleo", 20.0)],
    },
    SeedRecipe {
        name: "Feijão caseiro",
        yield_description: "6 porções",
        description: "Feijão cozido com tempero tradicional.",
        image_ref: "feijao.webp",
        ingredients: &[("feijão carioca", 500.0), ("cebola", 50.0), ("alho", 10.0)],
    },
    SeedRecipe {
        name: "Carne moída refogada",
        yield_description: "4 porções",
        description: "Carne moída refogada com cebola e alho.",
        image_ref: "carne.webp",
        ingredients: &[("carne moída", 500.0), ("cebola", 50.0), ("alho", 10.0)],
    },
    SeedRecipe {
        name: "Frango grelhado",
        yield_description: "4 porções",
        description: "Peito de frango grelhado com azeite e sal.",
        image_ref: "frango.png",
        ingredients: &[("peito de frango", 600.0), ("sal", 5.0), ("azeite", 20.0)],
    },
    SeedRecipe {
        name: "Macarrão ao alho e óleo",
        yield_description: "5 porções",
        description: "Macarrão simples com alho dourado no óleo.",
        image_ref: "macarrao.png",
        ingredients: &[("macarrão", 500.0), ("alho", 15.0), ("óleo", 30.0)],
    },
    SeedRecipe {
        name: "Brigadeiro",
        yield_description: "20 unidades",
        description: "Docinho clássico de festa.",
        image_ref: "brigadeiro.png",
        ingredients: &[
            ("leite condensado", 395.0),
            ("chocolate em pó", 30.0),
            ("manteiga", 10.0),
        ],
    },
    SeedRecipe {
        name: "Bolo de cenoura",
        yield_description: "1 bolo médio",
        description: "Bolo de cenoura com cobertura de chocolate.",
        image_ref: "bolo_cenoura.webp",
        ingredients: &[
            ("cenoura", 300.0),
            ("açúcar", 200.0),
            ("farinha de trigo", 250.0),
            ("ovos", 3.0),
        ],
    },
    SeedRecipe {
        name: "Pudim de leite",
        yield_description: "1 forma média",
        description: "Pudim tradicional com calda de açúcar.",
        image_ref: "pudim.png",
        ingredients: &[("leite condensado", 395.0), ("leite", 395.0), ("ovos", 3.0)],
    },
];

fn ingredient_id_by_name(
    conn: &mut database::Connection,
    ingredient_name: &str,
) -> QueryResult<IngredientId> {
    use database::schema::ingredients::dsl::*;

    ingredients
        .select(id)
        .filter(name.eq(ingredient_name))
        .get_result(conn)
}

fn seed_recipe(conn: &mut database::Connection, recipe: &SeedRecipe) -> QueryResult<usize> {
    let new_recipe_id: RecipeId = {
        use database::schema::recipes::dsl::*;

        diesel::insert_or_ignore_into(recipes)
            .values((
                name.eq(recipe.name),
                yield_description.eq(recipe.yield_description),
                description.eq(recipe.description),
                image_ref.eq(Some(recipe.image_ref)),
            ))
            .execute(conn)?;

        recipes
            .select(id)
            .filter(name.eq(recipe.name))
            .get_result(conn)?
    };

    let mut num_inserted = 0;
    for (ingredient_name, quantity) in recipe.ingredients {
        let usage = RecipeIngredient {
            recipe_id: new_recipe_id,
            ingredient_id: ingredient_id_by_name(conn, ingredient_name)?,
            base_quantity: *quantity,
        };
        num_inserted += diesel::insert_or_ignore_into(
            database::schema::recipe_ingredients::dsl::recipe_ingredients,
        )
        .values(usage)
        .execute(conn)?;
    }
    Ok(num_inserted)
}

/// Inserts whatever part of the default catalog is missing. Running it again is a no-op.
pub fn populate(conn: &mut database::Connection) -> QueryResult<()> {
    let num_inserted = conn.transaction::<_, diesel::result::Error, _>(|conn| {
        use database::schema::ingredients::dsl::*;

        for ingredient_name in INGREDIENTS {
            diesel::insert_or_ignore_into(ingredients)
                .values(name.eq(*ingredient_name))
                .execute(conn)?;
        }

        let mut num_inserted = 0;
        for recipe in RECIPES {
            num_inserted += seed_recipe(conn, recipe)?;
        }
        Ok(num_inserted)
    })?;

    if num_inserted > 0 {
        log::info!("seeded catalog with {num_inserted} recipe ingredients");
    }
    Ok(())
}

#[test]
fn populate_is_idempotent() {
    let mut conn = database::test_connection();
    populate(&mut conn).unwrap();
    populate(&mut conn).unwrap();

    let num_ingredients: i64 = database::schema::ingredients::table
        .count()
        .get_result(&mut conn)
        .unwrap();
    let num_recipes: i64 = database::schema::recipes::table
        .count()
        .get_result(&mut conn)
        .unwrap();
    let num_usages: i64 = database::schema::recipe_ingredients::table
        .count()
        .get_result(&mut conn)
        .unwrap();

    assert_eq!(num_ingredients, INGREDIENTS.len() as i64);
    assert_eq!(num_recipes, RECIPES.len() as i64);
    assert_eq!(
        num_usages,
        RECIPES.iter().map(|r| r.ingredients.len() as i64).sum::<i64>()
    );
}

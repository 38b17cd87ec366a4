// Copyright 2023 Remi Bernotavicius

//! Turns an order into the total amount of each ingredient it needs.

use crate::database;
use database::models::OrderId;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::QueryResult;
use diesel::RunQueryDsl as _;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingListItem {
    pub ingredient_name: String,
    /// Unrounded grams.
    pub total_quantity: f64,
}

impl ShoppingListItem {
    /// Whole grams for display, halves rounded up.
    pub fn grams(&self) -> f64 {
        self.total_quantity.round()
    }
}

impl fmt::Display for ShoppingListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}g", self.ingredient_name, self.grams())
    }
}

/// One entry per ingredient, sorted by ingredient name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn total_for(&self, ingredient_name: &str) -> Option<f64> {
        self.items
            .iter()
            .find(|i| i.ingredient_name == ingredient_name)
            .map(|i| i.total_quantity)
    }
}

/// Sums `base_quantity * multiplier` per ingredient name.
///
/// Rows are `(ingredient name, base quantity, multiplier)`, one for each ingredient of each recipe
/// in an order. Names compare byte-wise, the same as SQLite's default `BINARY` collation.
pub fn aggregate(rows: impl IntoIterator<Item = (String, f64, f64)>) -> ShoppingList {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for (name, base_quantity, multiplier) in rows {
        *totals.entry(name).or_default() += base_quantity * multiplier;
    }
    ShoppingList {
        items: totals
            .into_iter()
            .map(|(ingredient_name, total_quantity)| ShoppingListItem {
                ingredient_name,
                total_quantity,
            })
            .collect(),
    }
}

/// The shopping list for `order`. An order that doesn't exist has nothing to buy.
pub fn for_order(conn: &mut database::Connection, order: OrderId) -> QueryResult<ShoppingList> {
    use database::schema::{ingredients, order_recipes, recipe_ingredients, recipes};

    let rows: Vec<(String, f64, f64)> = order_recipes::table
        .inner_join(
            recipes::table.inner_join(recipe_ingredients::table.inner_join(ingredients::table)),
        )
        .filter(order_recipes::order_id.eq(order))
        .select((
            ingredients::name,
            recipe_ingredients::base_quantity,
            order_recipes::multiplier,
        ))
        .order_by((ingredients::name.asc(), order_recipes::id.asc()))
        .load(conn)?;

    let list = aggregate(rows);
    log::debug!(
        "order {order} needs {} distinct ingredients",
        list.len()
    );
    Ok(list)
}

#[cfg(test)]
fn insert_order(conn: &mut database::Connection, contents: &[(&str, f64)]) -> OrderId {
    use database::models::{RecipeId, UserId};
    use database::schema::{order_recipes, orders, recipes, users};

    let user: UserId = diesel::insert_into(users::table)
        .values((
            users::name.eq("Cook"),
            users::password.eq("secret"),
            users::email.eq("cook@example.com"),
        ))
        .returning(users::id)
        .get_result(conn)
        .unwrap();

    let order: OrderId = diesel::insert_into(orders::table)
        .values((
            orders::user_id.eq(user),
            orders::order_date.eq(chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
        ))
        .returning(orders::id)
        .get_result(conn)
        .unwrap();

    for &(recipe_name, multiplier) in contents {
        let recipe: RecipeId = recipes::table
            .select(recipes::id)
            .filter(recipes::name.eq(recipe_name))
            .get_result(conn)
            .unwrap();
        diesel::insert_into(order_recipes::table)
            .values((
                order_recipes::order_id.eq(order),
                order_recipes::recipe_id.eq(recipe),
                order_recipes::multiplier.eq(multiplier),
            ))
            .execute(conn)
            .unwrap();
    }
    order
}

#[test]
fn rice_and_pasta_order() {
    let mut conn = database::test_connection();
    let order = insert_order(
        &mut conn,
        &[("Arroz temperado", 2.0), ("Macarrão ao alho e óleo", 1.0)],
    );

    let list = for_order(&mut conn, order).unwrap();
    assert_eq!(
        list.items(),
        &[
            ShoppingListItem {
                ingredient_name: "alho".into(),
                total_quantity: 35.0,
            },
            ShoppingListItem {
                ingredient_name: "arroz".into(),
                total_quantity: 800.0,
            },
            ShoppingListItem {
                ingredient_name: "macarrão".into(),
                total_quantity: 500.0,
            },
            ShoppingListItem {
                ingredient_name: "óleo".into(),
                total_quantity: 70.0,
            },
        ]
    );
}

#[test]
fn shared_ingredient_contributions_add() {
    let list = aggregate([
        ("cebola".to_owned(), 50.0, 3.0),
        ("feijão carioca".to_owned(), 500.0, 3.0),
        ("cebola".to_owned(), 50.0, 2.0),
        ("carne moída".to_owned(), 500.0, 2.0),
    ]);
    assert_eq!(list.total_for("cebola"), Some(50.0 * 3.0 + 50.0 * 2.0));
    assert_eq!(list.len(), 3);
}

#[test]
fn missing_order_is_empty() {
    let mut conn = database::test_connection();
    let list = for_order(&mut conn, OrderId(4242)).unwrap();
    assert!(list.is_empty());
}

#[test]
fn order_without_recipes_is_empty() {
    let mut conn = database::test_connection();
    let order = insert_order(&mut conn, &[]);
    assert!(for_order(&mut conn, order).unwrap().is_empty());
}

#[test]
fn disjoint_recipes_keep_every_ingredient() {
    let mut conn = database::test_connection();
    let order = insert_order(&mut conn, &[("Frango grelhado", 2.0), ("Brigadeiro", 3.0)]);

    let list = for_order(&mut conn, order).unwrap();
    assert_eq!(list.len(), 6);
    assert_eq!(list.total_for("peito de frango"), Some(1200.0));
    assert_eq!(list.total_for("sal"), Some(10.0));
    assert_eq!(list.total_for("azeite"), Some(40.0));
    assert_eq!(list.total_for("leite condensado"), Some(1185.0));
    assert_eq!(list.total_for("chocolate em pó"), Some(90.0));
    assert_eq!(list.total_for("manteiga"), Some(30.0));
}

#[test]
fn sorted_unique_and_repeatable() {
    let mut conn = database::test_connection();
    let order = insert_order(
        &mut conn,
        &[
            ("Bolo de cenoura", 1.0),
            ("Pudim de leite", 2.0),
            ("Brigadeiro", 1.0),
        ],
    );

    let first = for_order(&mut conn, order).unwrap();
    let names: Vec<_> = first
        .items()
        .iter()
        .map(|i| i.ingredient_name.as_str())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(names, sorted);
    assert_eq!(first.total_for("ovos"), Some(3.0 + 6.0));
    assert_eq!(first.total_for("leite condensado"), Some(790.0 + 395.0));

    let second = for_order(&mut conn, order).unwrap();
    assert_eq!(first, second);
}

#[test]
fn fractional_multiplier() {
    let mut conn = database::test_connection();
    let order = insert_order(&mut conn, &[("Arroz temperado", 1.5)]);

    let list = for_order(&mut conn, order).unwrap();
    assert_eq!(list.total_for("arroz"), Some(600.0));
    assert_eq!(list.total_for("alho"), Some(15.0));
    assert_eq!(list.total_for("óleo"), Some(30.0));
}

#[test]
fn display_rounds_to_whole_grams() {
    let item = |total_quantity| ShoppingListItem {
        ingredient_name: "alho".into(),
        total_quantity,
    };
    assert_eq!(item(35.0).to_string(), "alho: 35g");
    assert_eq!(item(2.5).to_string(), "alho: 3g");
    assert_eq!(item(2.49).to_string(), "alho: 2g");
    assert_eq!(item(0.4).to_string(), "alho: 0g");
}

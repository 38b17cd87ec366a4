// Copyright 2023 Remi Bernotavicius

use crate::cart::Cart;
use crate::database;
use database::models::{Order, OrderId, OrderRecipe, RecipeHandle, User, UserId};
use derive_more::Display;
use diesel::prelude::Connection as _;
use diesel::prelude::OptionalExtension as _;
use diesel::BelongingToDsl as _;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::QueryResult;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

#[derive(Debug, Display)]
pub enum FinalizeError {
    #[display("the cart is empty")]
    EmptyCart,
    #[display("nobody is logged in")]
    NotLoggedIn,
    #[display("database error: {_0}")]
    Store(diesel::result::Error),
}

impl std::error::Error for FinalizeError {}

impl From<diesel::result::Error> for FinalizeError {
    fn from(e: diesel::result::Error) -> Self {
        Self::Store(e)
    }
}

/// Records the cart as a new order for `user` on `order_date` and empties the cart.
///
/// Either the order and every one of its recipes are stored, or nothing is and the cart is left
/// as it was.
pub fn finalize(
    conn: &mut database::Connection,
    cart: &mut Cart,
    user: Option<UserId>,
    order_date: chrono::NaiveDate,
) -> Result<OrderId, FinalizeError> {
    if cart.is_empty() {
        return Err(FinalizeError::EmptyCart);
    }
    let user = user.ok_or(FinalizeError::NotLoggedIn)?;

    let new_order = conn.transaction::<_, FinalizeError, _>(|conn| {
        use database::schema::{order_recipes, orders};

        let new_order: OrderId = diesel::insert_into(orders::table)
            .values((orders::user_id.eq(user), orders::order_date.eq(order_date)))
            .returning(orders::id)
            .get_result(conn)?;

        for (recipe, quantity) in cart.entries() {
            diesel::insert_into(order_recipes::table)
                .values((
                    order_recipes::order_id.eq(new_order),
                    order_recipes::recipe_id.eq(recipe),
                    order_recipes::multiplier.eq(f64::from(quantity)),
                ))
                .execute(conn)?;
        }
        Ok(new_order)
    })?;

    log::info!(
        "user {user} placed order {new_order} with {} recipes for {order_date}",
        cart.len()
    );
    cart.clear();
    Ok(new_order)
}

/// The user's orders, latest service date first.
pub fn orders_for_user(conn: &mut database::Connection, user: &User) -> QueryResult<Vec<Order>> {
    use database::schema::orders::dsl::*;

    Order::belonging_to(user)
        .select(Order::as_select())
        .order_by((order_date.desc(), id.desc()))
        .load(conn)
}

pub fn get_order(conn: &mut database::Connection, order: OrderId) -> QueryResult<Option<Order>> {
    use database::schema::orders::dsl::*;

    orders
        .select(Order::as_select())
        .filter(id.eq(order))
        .get_result(conn)
        .optional()
}

/// The recipes that make up `order`, in the order they were added.
pub fn order_recipes(
    conn: &mut database::Connection,
    order: &Order,
) -> QueryResult<Vec<(OrderRecipe, RecipeHandle)>> {
    use database::schema::order_recipes::dsl::*;

    OrderRecipe::belonging_to(order)
        .inner_join(database::schema::recipes::table)
        .select((OrderRecipe::as_select(), RecipeHandle::as_select()))
        .order_by(id.asc())
        .load(conn)
}

#[cfg(test)]
fn test_user(conn: &mut database::Connection) -> User {
    crate::account::register(
        conn,
        &crate::account::Registration {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "hunter2".into(),
            confirm_password: "hunter2".into(),
            phone: String::new(),
            address: String::new(),
        },
    )
    .unwrap()
}

#[cfg(test)]
fn recipe_by_name(
    conn: &mut database::Connection,
    recipe_name: &str,
) -> database::models::RecipeId {
    use database::schema::recipes::dsl::*;

    recipes
        .select(id)
        .filter(name.eq(recipe_name))
        .get_result(conn)
        .unwrap()
}

#[cfg(test)]
fn test_date() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
}

#[test]
fn finalize_stores_order_and_clears_cart() {
    let mut conn = database::test_connection();
    let user = test_user(&mut conn);
    let rice = recipe_by_name(&mut conn, "Arroz temperado");
    let pasta = recipe_by_name(&mut conn, "Macarrão ao alho e óleo");

    let mut cart = Cart::default();
    cart.set_quantity(rice, 2);
    cart.set_quantity(pasta, 1);

    let new_order = finalize(&mut conn, &mut cart, Some(user.id), test_date()).unwrap();
    assert!(cart.is_empty());

    let order = get_order(&mut conn, new_order).unwrap().unwrap();
    assert_eq!(order.user_id, user.id);
    assert_eq!(order.order_date, test_date());

    let contents: Vec<_> = order_recipes(&mut conn, &order)
        .unwrap()
        .into_iter()
        .map(|(usage, recipe)| (recipe.id, usage.multiplier))
        .collect();
    assert_eq!(contents, vec![(rice, 2.0), (pasta, 1.0)]);

    let list = crate::shopping_list::for_order(&mut conn, new_order).unwrap();
    assert_eq!(list.total_for("alho"), Some(35.0));
    assert_eq!(list.total_for("óleo"), Some(70.0));
}

#[test]
fn finalize_rejects_empty_cart() {
    let mut conn = database::test_connection();
    let user = test_user(&mut conn);

    let mut cart = Cart::default();
    let result = finalize(&mut conn, &mut cart, Some(user.id), test_date());
    assert!(matches!(result, Err(FinalizeError::EmptyCart)));
    assert!(orders_for_user(&mut conn, &user).unwrap().is_empty());
}

#[test]
fn finalize_rejects_missing_user() {
    let mut conn = database::test_connection();
    let rice = recipe_by_name(&mut conn, "Arroz temperado");

    let mut cart = Cart::default();
    cart.set_quantity(rice, 1);
    let result = finalize(&mut conn, &mut cart, None, test_date());
    assert!(matches!(result, Err(FinalizeError::NotLoggedIn)));
    assert_eq!(cart.get_quantity(rice), 1);

    let num_orders: i64 = database::schema::orders::table
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(num_orders, 0);
}

#[test]
fn failed_finalize_leaves_nothing_behind() {
    use database::models::RecipeId;

    let mut conn = database::test_connection();
    let user = test_user(&mut conn);
    let rice = recipe_by_name(&mut conn, "Arroz temperado");

    let mut cart = Cart::default();
    cart.set_quantity(rice, 1);
    cart.set_quantity(RecipeId(9999), 2);

    let result = finalize(&mut conn, &mut cart, Some(user.id), test_date());
    assert!(matches!(result, Err(FinalizeError::Store(_))));
    assert_eq!(cart.len(), 2);

    let num_orders: i64 = database::schema::orders::table
        .count()
        .get_result(&mut conn)
        .unwrap();
    let num_order_recipes: i64 = database::schema::order_recipes::table
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!((num_orders, num_order_recipes), (0, 0));
}

#[test]
fn history_is_newest_first() {
    let mut conn = database::test_connection();
    let user = test_user(&mut conn);
    let rice = recipe_by_name(&mut conn, "Arroz temperado");

    let mut placed = vec![];
    for day in [3, 20, 11] {
        let mut cart = Cart::default();
        cart.set_quantity(rice, 1);
        let date = chrono::NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
        placed.push(finalize(&mut conn, &mut cart, Some(user.id), date).unwrap());
    }

    let history: Vec<_> = orders_for_user(&mut conn, &user)
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(history, vec![placed[1], placed[2], placed[0]]);
}

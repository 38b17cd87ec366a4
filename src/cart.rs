// Copyright 2023 Remi Bernotavicius

use crate::database::models::RecipeId;
use std::collections::BTreeMap;

/// The recipes picked so far in this session and how many units of each.
///
/// A recipe is either absent or present with a quantity of at least one.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    quantities: BTreeMap<RecipeId, u32>,
}

impl Cart {
    /// Overwrites the quantity for `recipe_id`. Zero or less removes the recipe.
    pub fn set_quantity(&mut self, recipe_id: RecipeId, quantity: i64) {
        if quantity <= 0 {
            self.quantities.remove(&recipe_id);
        } else {
            let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            self.quantities.insert(recipe_id, quantity);
        }
    }

    pub fn get_quantity(&self, recipe_id: RecipeId) -> u32 {
        self.quantities.get(&recipe_id).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.quantities.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (RecipeId, u32)> + '_ {
        self.quantities.iter().map(|(id, q)| (*id, *q))
    }

    pub fn recipe_ids(&self) -> Vec<RecipeId> {
        self.quantities.keys().copied().collect()
    }
}

#[test]
fn set_and_get() {
    use maplit::btreemap;

    let mut cart = Cart::default();
    assert_eq!(cart.get_quantity(RecipeId(5)), 0);

    cart.set_quantity(RecipeId(5), 3);
    cart.set_quantity(RecipeId(2), 1);
    assert_eq!(cart.get_quantity(RecipeId(5)), 3);
    assert_eq!(
        cart.entries().collect::<BTreeMap<_, _>>(),
        btreemap! {
            RecipeId(2) => 1,
            RecipeId(5) => 3,
        }
    );

    cart.set_quantity(RecipeId(5), 4);
    assert_eq!(cart.get_quantity(RecipeId(5)), 4);
    assert_eq!(cart.len(), 2);
}

#[test]
fn zero_removes_entry() {
    let mut cart = Cart::default();
    cart.set_quantity(RecipeId(5), 3);
    cart.set_quantity(RecipeId(5), 0);

    assert_eq!(cart.get_quantity(RecipeId(5)), 0);
    assert!(cart.is_empty());
    assert_eq!(cart.recipe_ids(), vec![]);
}

#[test]
fn negative_removes_entry() {
    let mut cart = Cart::default();
    cart.set_quantity(RecipeId(1), 2);
    cart.set_quantity(RecipeId(1), -4);
    assert_eq!(cart.get_quantity(RecipeId(1)), 0);

    cart.set_quantity(RecipeId(7), -1);
    assert!(cart.is_empty());
}

#[test]
fn clear_empties_cart() {
    let mut cart = Cart::default();
    cart.set_quantity(RecipeId(1), 2);
    cart.set_quantity(RecipeId(3), 1);
    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.get_quantity(RecipeId(1)), 0);
}

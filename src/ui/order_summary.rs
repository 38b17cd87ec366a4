use super::{
    generate_rtf, new_error_toast, shopping_list::show_shopping_list, store_error_toast, Session,
};
use crate::cart::Cart;
use crate::catalog;
use crate::database::{
    self,
    models::{Order, OrderId, Recipe},
};
use crate::order::{self, FinalizeError};
use crate::shopping_list::{self, ShoppingList};
use eframe::egui;

pub enum UpdateEvent {
    OrderPlaced,
    ShowHistory,
}

enum State {
    Open {
        recipes: Vec<Recipe>,
        loaded_for: Option<Cart>,
        order_date: chrono::NaiveDate,
    },
    Finalized {
        order: Order,
        list: ShoppingList,
    },
}

impl State {
    fn open() -> Self {
        Self::Open {
            recipes: vec![],
            loaded_for: None,
            order_date: chrono::Local::now().date_naive(),
        }
    }

    fn finalized(conn: &mut database::Connection, id: OrderId) -> diesel::QueryResult<Self> {
        let order = order::get_order(conn, id)?.ok_or(diesel::result::Error::NotFound)?;
        let list = shopping_list::for_order(conn, id)?;
        Ok(Self::Finalized { order, list })
    }
}

/// The cart, a service date, and once the order goes through, its shopping list.
pub struct OrderSummaryWindow {
    state: State,
}

impl OrderSummaryWindow {
    pub fn new() -> Self {
        Self {
            state: State::open(),
        }
    }

    fn update_cart(recipes: &[Recipe], session: &mut Session, ui: &mut egui::Ui) {
        if session.cart.is_empty() {
            ui.label("Your cart is empty. Add recipes from the recipe list.");
            return;
        }
        egui::Grid::new("cart contents")
            .striped(true)
            .show(ui, |ui| {
                ui.strong("Recipe");
                ui.strong("Serves");
                ui.strong("Quantity");
                ui.end_row();
                for recipe in recipes {
                    let quantity = session.cart.get_quantity(recipe.id);
                    if quantity == 0 {
                        continue;
                    }
                    ui.label(&recipe.name);
                    ui.label(&recipe.yield_description);
                    ui.label(format!("x{quantity}"));
                    if ui.button("Remove").clicked() {
                        session.cart.set_quantity(recipe.id, 0);
                    }
                    ui.end_row();
                }
            });
    }

    fn update_open(
        recipes: &mut Vec<Recipe>,
        loaded_for: &mut Option<Cart>,
        order_date: &mut chrono::NaiveDate,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
        session: &mut Session,
        ui: &mut egui::Ui,
        events: &mut Vec<UpdateEvent>,
    ) -> Option<State> {
        if loaded_for.as_ref() != Some(&session.cart) {
            match catalog::recipes_by_ids(conn, &session.cart.recipe_ids()) {
                Ok(found) => *recipes = found,
                Err(error) => {
                    toasts.add(store_error_toast(&error));
                }
            }
            *loaded_for = Some(session.cart.clone());
        }

        Self::update_cart(recipes, session, ui);
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Service date:");
            ui.add(egui_extras::DatePickerButton::new(order_date));
        });

        let mut next = None;
        let ready = !session.cart.is_empty();
        if ui
            .add_enabled(ready, egui::Button::new("Finalize Order"))
            .clicked()
        {
            let user = session.user.as_ref().map(|u| u.id);
            match order::finalize(conn, &mut session.cart, user, *order_date) {
                Ok(id) => {
                    events.push(UpdateEvent::OrderPlaced);
                    match State::finalized(conn, id) {
                        Ok(state) => next = Some(state),
                        Err(error) => {
                            toasts.add(store_error_toast(&error));
                        }
                    }
                }
                Err(FinalizeError::Store(error)) => {
                    toasts.add(store_error_toast(&error));
                }
                Err(error) => {
                    toasts.add(new_error_toast(format!("Couldn't place order: {error}")));
                }
            }
        }
        next
    }

    fn update_finalized(
        order: &Order,
        list: &ShoppingList,
        toasts: &mut egui_toast::Toasts,
        ui: &mut egui::Ui,
        events: &mut Vec<UpdateEvent>,
    ) -> Option<State> {
        ui.heading(format!("Order #{} placed", order.id));
        ui.label(format!("Served on {}", order.order_date.format("%d/%m/%Y")));
        ui.separator();

        ui.strong("Shopping List");
        show_shopping_list(ui, order.id, list);
        ui.separator();

        let mut next = None;
        ui.horizontal(|ui| {
            if ui.button("Export").clicked() {
                if let Err(error) = generate_rtf::generate_and_open_shopping_list(order, list) {
                    toasts.add(new_error_toast(format!(
                        "Error exporting shopping list: {error}"
                    )));
                }
            }
            if ui.button("My Orders").clicked() {
                events.push(UpdateEvent::ShowHistory);
            }
            if ui.button("New Order").clicked() {
                next = Some(State::open());
            }
        });
        next
    }

    pub fn update(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
        session: &mut Session,
    ) -> (bool, Vec<UpdateEvent>) {
        let mut events = vec![];
        let mut open = true;
        egui::Window::new("Your Order")
            .open(&mut open)
            .show(ctx, |ui| {
                let next = match &mut self.state {
                    State::Open {
                        recipes,
                        loaded_for,
                        order_date,
                    } => Self::update_open(
                        recipes,
                        loaded_for,
                        order_date,
                        conn,
                        toasts,
                        session,
                        ui,
                        &mut events,
                    ),
                    State::Finalized { order, list } => {
                        Self::update_finalized(order, list, toasts, ui, &mut events)
                    }
                };
                if let Some(next) = next {
                    self.state = next;
                }
            });

        (!open, events)
    }
}

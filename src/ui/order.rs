use super::{generate_rtf, new_error_toast, shopping_list::show_shopping_list};
use crate::database::{
    self,
    models::{Order, OrderRecipe, RecipeHandle},
};
use crate::order;
use crate::shopping_list::{self, ShoppingList};
use eframe::egui;

/// A past order with what went into it and what to buy for it.
pub struct OrderWindow {
    order: Order,
    recipes: Vec<(OrderRecipe, RecipeHandle)>,
    list: ShoppingList,
}

impl OrderWindow {
    pub fn new(conn: &mut database::Connection, order: Order) -> diesel::QueryResult<Self> {
        Ok(Self {
            recipes: order::order_recipes(conn, &order)?,
            list: shopping_list::for_order(conn, order.id)?,
            order,
        })
    }

    pub fn update(&mut self, ctx: &egui::Context, toasts: &mut egui_toast::Toasts) -> bool {
        let mut open = true;
        egui::Window::new(format!("Order #{}", self.order.id))
            .id(egui::Id::new(("order", self.order.id)))
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Served on {}",
                    self.order.order_date.format("%d/%m/%Y")
                ));
                ui.separator();

                ui.strong("Recipes");
                for (usage, recipe) in &self.recipes {
                    ui.label(format!("{} x{}", recipe.name, usage.multiplier));
                }
                ui.separator();

                ui.strong("Shopping List");
                show_shopping_list(ui, self.order.id, &self.list);
                if ui.button("Export").clicked() {
                    if let Err(error) =
                        generate_rtf::generate_and_open_shopping_list(&self.order, &self.list)
                    {
                        toasts.add(new_error_toast(format!(
                            "Error exporting shopping list: {error}"
                        )));
                    }
                }
            });

        !open
    }
}

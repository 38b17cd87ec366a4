use super::{quantity::QuantityStepper, recipe::RecipeWindow, store_error_toast, Session};
use crate::catalog::{self, CachedQuery};
use crate::database::{
    self,
    models::{Recipe, RecipeId},
};
use eframe::egui;
use std::collections::HashMap;

pub struct RecipeListWindow {
    recipes: Vec<Recipe>,
    filter: String,
    cached_recipe_search: Option<CachedQuery<Recipe>>,
}

impl RecipeListWindow {
    pub fn new(conn: &mut database::Connection) -> diesel::QueryResult<Self> {
        Ok(Self {
            recipes: catalog::list_recipes(conn)?,
            filter: String::new(),
            cached_recipe_search: None,
        })
    }

    fn update_filter(
        &mut self,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
        ui: &mut egui::Ui,
    ) {
        ui.horizontal(|ui| {
            ui.label("Search:");
            let response =
                ui.add(egui::TextEdit::singleline(&mut self.filter).hint_text("recipe name"));
            if response.changed() {
                match catalog::search_recipes(conn, &mut self.cached_recipe_search, &self.filter)
                {
                    Ok(recipes) => self.recipes = recipes,
                    Err(error) => {
                        toasts.add(store_error_toast(&error));
                    }
                }
            }
        });
    }

    fn update_table(
        &mut self,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
        session: &mut Session,
        recipe_windows: &mut HashMap<RecipeId, RecipeWindow>,
        ui: &mut egui::Ui,
    ) {
        if self.recipes.is_empty() {
            ui.label("No recipes found.");
            return;
        }
        egui::Grid::new("recipe listing")
            .striped(true)
            .show(ui, |ui| {
                for recipe in &self.recipes {
                    let mut shown = recipe_windows.contains_key(&recipe.id);
                    ui.toggle_value(&mut shown, recipe.name.as_str());
                    ui.label(&recipe.yield_description);

                    let mut quantity = session.cart.get_quantity(recipe.id);
                    if ui.add(QuantityStepper::new(&mut quantity)).changed() {
                        session.cart.set_quantity(recipe.id, quantity.into());
                    }
                    ui.end_row();

                    if shown && !recipe_windows.contains_key(&recipe.id) {
                        match RecipeWindow::new(conn, recipe.id) {
                            Ok(Some(window)) => {
                                recipe_windows.insert(recipe.id, window);
                            }
                            Ok(None) => {
                                toasts.add(super::new_error_toast("Couldn't find recipe"));
                            }
                            Err(error) => {
                                toasts.add(store_error_toast(&error));
                            }
                        }
                    } else if !shown {
                        recipe_windows.remove(&recipe.id);
                    }
                }
            });
    }

    pub fn update(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
        session: &mut Session,
        recipe_windows: &mut HashMap<RecipeId, RecipeWindow>,
    ) {
        egui::Window::new("Recipes").show(ctx, |ui| {
            self.update_filter(conn, toasts, ui);
            ui.separator();

            let scroll_height = ui.available_height() - 35.0;
            egui::ScrollArea::vertical()
                .auto_shrink(false)
                .max_height(scroll_height)
                .show(ui, |ui| {
                    self.update_table(conn, toasts, session, recipe_windows, ui);
                });
            ui.separator();
            ui.label(format!("{} recipes in cart", session.cart.len()));
        });
    }
}

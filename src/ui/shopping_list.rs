use crate::shopping_list::ShoppingList;
use eframe::egui;
use std::hash::Hash;

pub fn show_shopping_list(ui: &mut egui::Ui, id_salt: impl Hash, list: &ShoppingList) {
    if list.is_empty() {
        ui.label("Nothing to buy.");
        return;
    }
    egui::Grid::new(("shopping list", id_salt))
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Ingredient");
            ui.strong("Quantity");
            ui.end_row();
            for item in list.items() {
                ui.label(&item.ingredient_name);
                ui.label(format!("{}g", item.grams()));
                ui.end_row();
            }
        });
}

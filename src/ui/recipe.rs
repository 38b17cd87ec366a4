use super::{quantity::QuantityStepper, Session};
use crate::catalog::{self, RecipeDetail};
use crate::database::{self, models::RecipeId};
use eframe::egui;

pub struct RecipeWindow {
    detail: RecipeDetail,
    image_uri: Option<String>,
}

/// Recipe pictures live in the `images` directory next to the database.
fn image_uri(image_ref: &str) -> Option<String> {
    let path = crate::data_path().ok()?.join("images").join(image_ref);
    if !path.exists() {
        log::debug!("no picture at {}", path.display());
        return None;
    }
    Some(format!("file://{}", path.display()))
}

impl RecipeWindow {
    pub fn new(
        conn: &mut database::Connection,
        recipe_id: RecipeId,
    ) -> diesel::QueryResult<Option<Self>> {
        Ok(catalog::get_recipe(conn, recipe_id)?.map(|detail| Self {
            image_uri: detail.recipe.image_ref.as_deref().and_then(image_uri),
            detail,
        }))
    }

    fn update_ingredients(&self, ui: &mut egui::Ui) {
        let recipe = &self.detail.recipe;
        if self.detail.ingredients.is_empty() {
            ui.label("No ingredients listed.");
            return;
        }
        egui::Grid::new(("recipe ingredients", recipe.id))
            .striped(true)
            .show(ui, |ui| {
                for line in &self.detail.ingredients {
                    ui.label(&line.ingredient.name);
                    ui.label(format!("{}g", line.base_quantity));
                    ui.end_row();
                }
            });
    }

    pub fn update(&mut self, ctx: &egui::Context, session: &mut Session) -> bool {
        let mut open = true;
        let recipe = &self.detail.recipe;
        egui::Window::new(recipe.name.clone())
            .id(egui::Id::new(("recipe", recipe.id)))
            .open(&mut open)
            .show(ctx, |ui| {
                if let Some(uri) = &self.image_uri {
                    ui.add(
                        egui::Image::new(uri.as_str())
                            .maintain_aspect_ratio(true)
                            .max_width(300.0),
                    );
                }
                if !recipe.description.is_empty() {
                    ui.label(&recipe.description);
                }
                ui.label(format!("Serves: {}", recipe.yield_description));
                ui.separator();

                ui.strong("Ingredients");
                self.update_ingredients(ui);
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("In cart:");
                    let mut quantity = session.cart.get_quantity(recipe.id);
                    if ui.add(QuantityStepper::new(&mut quantity)).changed() {
                        session.cart.set_quantity(recipe.id, quantity.into());
                    }
                });
            });

        !open
    }
}

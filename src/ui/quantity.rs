use eframe::egui;

/// A `- n +` stepper. The response is marked changed when either button is clicked.
pub struct QuantityStepper<'a> {
    quantity: &'a mut u32,
}

impl<'a> QuantityStepper<'a> {
    pub fn new(quantity: &'a mut u32) -> Self {
        Self { quantity }
    }
}

impl egui::Widget for QuantityStepper<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let Self { quantity } = self;
        let egui::InnerResponse {
            inner: changed,
            mut response,
        } = ui.horizontal(|ui| {
            let mut changed = false;
            if ui
                .add_enabled(*quantity > 0, egui::Button::new("-"))
                .clicked()
            {
                *quantity -= 1;
                changed = true;
            }
            ui.label(quantity.to_string());
            if ui.button("+").clicked() {
                *quantity = quantity.saturating_add(1);
                changed = true;
            }
            changed
        });
        if changed {
            response.mark_changed();
        }
        response
    }
}

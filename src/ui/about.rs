use eframe::egui;

pub struct AboutWindow {}

impl AboutWindow {
    pub fn new() -> Self {
        Self {}
    }

    pub fn update(&mut self, ctx: &egui::Context) -> bool {
        let mut open = true;

        egui::Window::new("About")
            .resizable([false, false])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Personal Chef");
                    ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                    ui.label("Pick recipes, choose a day, get a shopping list.");
                });
            });

        !open
    }
}

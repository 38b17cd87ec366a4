// Copyright 2023 Remi Bernotavicius

use crate::cart::Cart;
use crate::database;
use crate::database::models::{OrderId, RecipeId, User};
use eframe::egui;
use std::collections::HashMap;
use std::mem;

mod about;
mod generate_rtf;
mod login;
mod order;
mod order_history;
mod order_summary;
mod quantity;
mod recipe;
mod recipe_list;
mod shopping_list;

pub use generate_rtf::generate_and_open_shopping_list;

pub fn new_error_toast(text: impl Into<egui::WidgetText>) -> egui_toast::Toast {
    egui_toast::Toast {
        text: text.into(),
        kind: egui_toast::ToastKind::Error,
        options: egui_toast::ToastOptions::default()
            .duration_in_seconds(3.0)
            .show_progress(false)
            .show_icon(true),
        ..Default::default()
    }
}

fn store_error_toast(error: &diesel::result::Error) -> egui_toast::Toast {
    log::error!("database error: {error}");
    new_error_toast("Couldn't reach the database, please try again")
}

/// The logged in user and the recipes they've picked so far.
#[derive(Default)]
pub struct Session {
    pub user: Option<User>,
    pub cart: Cart,
}

pub struct PersonalChef {
    conn: database::Connection,
    session: Session,
    toasts: egui_toast::Toasts,
    login_window: login::LoginWindow,
    recipe_list: Option<recipe_list::RecipeListWindow>,
    recipes: HashMap<RecipeId, recipe::RecipeWindow>,
    order_summary: Option<order_summary::OrderSummaryWindow>,
    order_history: Option<order_history::OrderHistoryWindow>,
    orders: HashMap<OrderId, order::OrderWindow>,
    about_window: Option<about::AboutWindow>,
}

impl PersonalChef {
    pub fn new(conn: database::Connection) -> Self {
        Self {
            conn,
            session: Session::default(),
            toasts: egui_toast::Toasts::new()
                .anchor(egui::Align2::RIGHT_BOTTOM, (-10.0, -10.0))
                .direction(egui::Direction::BottomUp),
            login_window: login::LoginWindow::default(),
            recipe_list: None,
            recipes: HashMap::new(),
            order_summary: None,
            order_history: None,
            orders: HashMap::new(),
            about_window: None,
        }
    }

    fn open_recipe_list(&mut self) {
        match recipe_list::RecipeListWindow::new(&mut self.conn) {
            Ok(window) => self.recipe_list = Some(window),
            Err(error) => {
                self.toasts.add(store_error_toast(&error));
            }
        }
    }

    fn open_order_history(&mut self) {
        let Some(user) = &self.session.user else {
            return;
        };
        match order_history::OrderHistoryWindow::new(&mut self.conn, user) {
            Ok(window) => self.order_history = Some(window),
            Err(error) => {
                self.toasts.add(store_error_toast(&error));
            }
        }
    }

    fn log_out(&mut self) {
        if let Some(user) = &self.session.user {
            log::info!("user {} logged out", user.id);
        }
        self.session = Session::default();
        self.recipe_list = None;
        self.recipes.clear();
        self.order_summary = None;
        self.order_history = None;
        self.orders.clear();
    }

    fn update_login_window(&mut self, ctx: &egui::Context) {
        if let Some(user) = self.login_window.update(ctx, &mut self.conn) {
            self.session.user = Some(user);
            self.open_recipe_list();
        }
    }

    fn update_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Recipes").clicked() {
                        if self.recipe_list.is_none() {
                            self.open_recipe_list();
                        }
                        ui.close_menu();
                    }
                    if ui.button("Order History").clicked() {
                        self.open_order_history();
                        ui.close_menu();
                    }
                    if ui.button("Log Out").clicked() {
                        self.log_out();
                        ui.close_menu();
                    }
                });
                if ui
                    .button(format!("Cart ({})", self.session.cart.len()))
                    .clicked()
                    && self.order_summary.is_none()
                {
                    self.order_summary = Some(order_summary::OrderSummaryWindow::new());
                }
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() && self.about_window.is_none() {
                        self.about_window = Some(about::AboutWindow::new());
                        ui.close_menu();
                    }
                });
                if let Some(user) = &self.session.user {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!("Logged in as {}", user.name));
                    });
                }
            });
        });
    }

    fn update_recipe_list(&mut self, ctx: &egui::Context) {
        if let Some(window) = &mut self.recipe_list {
            window.update(
                ctx,
                &mut self.conn,
                &mut self.toasts,
                &mut self.session,
                &mut self.recipes,
            );
        }
    }

    fn update_recipes(&mut self, ctx: &egui::Context) {
        for (id, mut recipe) in mem::take(&mut self.recipes) {
            if !recipe.update(ctx, &mut self.session) {
                self.recipes.insert(id, recipe);
            }
        }
    }

    fn update_order_summary(&mut self, ctx: &egui::Context) {
        let Some(window) = &mut self.order_summary else {
            return;
        };
        let (closed, events) =
            window.update(ctx, &mut self.conn, &mut self.toasts, &mut self.session);
        if closed {
            self.order_summary = None;
        }
        for event in events {
            match event {
                order_summary::UpdateEvent::OrderPlaced => {
                    if self.order_history.is_some() {
                        self.open_order_history();
                    }
                }
                order_summary::UpdateEvent::ShowHistory => self.open_order_history(),
            }
        }
    }

    fn update_order_history(&mut self, ctx: &egui::Context) {
        if let Some(window) = &mut self.order_history {
            if window.update(ctx, &mut self.conn, &mut self.toasts, &mut self.orders) {
                self.order_history = None;
            }
        }
    }

    fn update_orders(&mut self, ctx: &egui::Context) {
        for (id, mut order) in mem::take(&mut self.orders) {
            if !order.update(ctx, &mut self.toasts) {
                self.orders.insert(id, order);
            }
        }
    }

    fn update_about_window(&mut self, ctx: &egui::Context) {
        if let Some(window) = &mut self.about_window {
            if window.update(ctx) {
                self.about_window = None;
            }
        }
    }
}

impl eframe::App for PersonalChef {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.user.is_none() {
            self.update_login_window(ctx);
        } else {
            self.update_menu(ctx);
            self.update_recipe_list(ctx);
            self.update_recipes(ctx);
            self.update_order_summary(ctx);
            self.update_order_history(ctx);
            self.update_orders(ctx);
        }
        self.update_about_window(ctx);
        self.toasts.show(ctx);
    }
}

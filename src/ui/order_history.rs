use super::{order::OrderWindow, store_error_toast};
use crate::database::{
    self,
    models::{Order, OrderId, User},
};
use crate::order;
use eframe::egui;
use std::collections::HashMap;

pub struct OrderHistoryWindow {
    orders: Vec<Order>,
}

impl OrderHistoryWindow {
    pub fn new(conn: &mut database::Connection, user: &User) -> diesel::QueryResult<Self> {
        Ok(Self {
            orders: order::orders_for_user(conn, user)?,
        })
    }

    pub fn update(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
        toasts: &mut egui_toast::Toasts,
        order_windows: &mut HashMap<OrderId, OrderWindow>,
    ) -> bool {
        let mut open = true;
        egui::Window::new("Order History")
            .open(&mut open)
            .show(ctx, |ui| {
                if self.orders.is_empty() {
                    ui.label("You haven't placed any orders yet.");
                    return;
                }
                egui::ScrollArea::vertical().show(ui, |ui| {
                    egui::Grid::new("order history")
                        .striped(true)
                        .show(ui, |ui| {
                            for order in &self.orders {
                                let mut shown = order_windows.contains_key(&order.id);
                                ui.toggle_value(&mut shown, format!("Order #{}", order.id));
                                ui.label(order.order_date.format("%d/%m/%Y").to_string());
                                ui.end_row();

                                if shown && !order_windows.contains_key(&order.id) {
                                    match OrderWindow::new(conn, order.clone()) {
                                        Ok(window) => {
                                            order_windows.insert(order.id, window);
                                        }
                                        Err(error) => {
                                            toasts.add(store_error_toast(&error));
                                        }
                                    }
                                } else if !shown {
                                    order_windows.remove(&order.id);
                                }
                            }
                        });
                });
            });

        !open
    }
}

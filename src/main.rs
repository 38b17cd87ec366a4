// Copyright 2023 Remi Bernotavicius

use clap::Parser;
use clap::Subcommand;
use database::models::OrderId;
use std::path::PathBuf;

mod account;
mod cart;
mod catalog;
mod database;
mod order;
mod shopping_list;
mod ui;

type Error = Box<dyn std::error::Error + Send + Sync + 'static>;
type Result<T> = std::result::Result<T, Error>;

#[derive(Parser, Debug)]
struct Args {
    /// Use this database file instead of the one in the user data directory.
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[arg(long, global = true, default_value = "info")]
    log_level: log::LevelFilter,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open the app.
    Run,
    /// Print every recipe along with its ingredients.
    Recipes,
    /// Print the orders placed by the account with the given email.
    Orders { email: String },
    /// Print the shopping list for an order.
    ShoppingList {
        order: i32,
        /// Also write it out as a rich text document and open it.
        #[arg(long)]
        export: bool,
    },
}

/// This is where the database and other user-data lives on-disk. On Linux it should be like:
/// `~/.local/share/personal_chef/`
fn data_path() -> Result<PathBuf> {
    let dirs = directories::BaseDirs::new().ok_or("failed to get user home directory")?;
    let path = dirs.data_dir().join("personal_chef");
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

fn run(conn: database::Connection) -> Result<()> {
    let native_options = eframe::NativeOptions {
        window_builder: Some(Box::new(|mut b: egui::viewport::ViewportBuilder| {
            b.maximized = Some(true);
            b
        })),
        ..Default::default()
    };
    eframe::run_native(
        "Personal Chef",
        native_options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(ui::PersonalChef::new(conn)))
        }),
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}

fn print_recipes(mut conn: database::Connection) -> Result<()> {
    for recipe in catalog::list_recipes(&mut conn)? {
        let Some(detail) = catalog::get_recipe(&mut conn, recipe.id)? else {
            continue;
        };
        println!("{} ({})", recipe.name, recipe.yield_description);
        for line in detail.ingredients {
            println!("    {}: {}g", line.ingredient.name, line.base_quantity);
        }
    }
    Ok(())
}

fn print_orders(mut conn: database::Connection, email: &str) -> Result<()> {
    let user = account::find_by_email(&mut conn, email)?
        .ok_or_else(|| format!("no account for {email}"))?;
    let orders = order::orders_for_user(&mut conn, &user)?;
    if orders.is_empty() {
        println!("{} hasn't placed any orders", user.name);
    }
    for o in orders {
        println!("Order #{} served on {}", o.id, o.order_date);
        for (usage, recipe) in order::order_recipes(&mut conn, &o)? {
            println!("    {} x{}", recipe.name, usage.multiplier);
        }
    }
    Ok(())
}

fn print_shopping_list(mut conn: database::Connection, id: OrderId, export: bool) -> Result<()> {
    let list = shopping_list::for_order(&mut conn, id)?;
    if list.is_empty() {
        println!("nothing to buy for order #{id}");
    }
    for item in list.items() {
        println!("{item}");
    }

    if export {
        let o = order::get_order(&mut conn, id)?.ok_or_else(|| format!("no order #{id}"))?;
        let path = ui::generate_and_open_shopping_list(&o, &list)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    simple_logger::SimpleLogger::new()
        .with_level(args.log_level)
        .init()?;

    let database_path = match args.database {
        Some(path) => path,
        None => data_path()?.join("data.sqlite"),
    };
    log::debug!("opening {}", database_path.display());
    let conn = database::establish_connection(database_path)?;

    match args.commands {
        Commands::Run => run(conn)?,
        Commands::Recipes => print_recipes(conn)?,
        Commands::Orders { email } => print_orders(conn, &email)?,
        Commands::ShoppingList { order, export } => {
            print_shopping_list(conn, OrderId(order), export)?
        }
    }
    Ok(())
}

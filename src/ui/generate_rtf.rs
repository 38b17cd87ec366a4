use crate::database::models::Order;
use crate::shopping_list::ShoppingList;
use std::path::PathBuf;

fn rich_text_header() -> String {
    let mut rich_text = String::new();
    rich_text += "{\\rtf1\n";
    rich_text +=
        "{\\fonttbl\\f0\\fnil\\fcharset0 HelveticaNeue-Bold;\\f1\\fswiss\\fcharset0 Helvetica;}\n";

    rich_text += "\\pard";
    for i in 1..13 {
        rich_text += &format!("\\tx{}", i * 560);
    }
    rich_text += "\\pardirnatural\\partightenfactor0\n";
    rich_text
}

fn rich_text_heading(text: &str, order: &Order) -> String {
    let mut rich_text = String::new();
    rich_text += &format!("\\f0\\b\\fs24 \\cf0 {text} for Order #{} \\\n", order.id);
    rich_text += &order
        .order_date
        .format_with_items(chrono::format::StrftimeItems::new("served on the %e, %B %Y\n"))
        .to_string();
    rich_text += "\\f1\\b0 ";
    rich_text
}

/// RTF is 7-bit, anything else goes in as a `\uN?` escape.
fn escape(text: &str) -> String {
    let mut escaped = String::new();
    for c in text.chars() {
        match c {
            '\\' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_ascii() => escaped.push(c),
            c => {
                let mut units = [0; 2];
                for unit in c.encode_utf16(&mut units) {
                    escaped += &format!("\\u{}?", *unit as i16);
                }
            }
        }
    }
    escaped
}

fn shopping_list_rich_text(order: &Order, list: &ShoppingList) -> String {
    let mut rich_text = rich_text_header();
    rich_text += &rich_text_heading("Shopping List", order);
    rich_text += "\\\n";

    if list.is_empty() {
        rich_text += "\\\nNothing to buy";
    }
    for item in list.items() {
        rich_text += &format!("\\\n{}", escape(&item.to_string()));
    }
    rich_text += "}";
    rich_text
}

/// Writes the shopping list for `order` to the data directory and opens it.
pub fn generate_and_open_shopping_list(
    order: &Order,
    list: &ShoppingList,
) -> crate::Result<PathBuf> {
    let lists_dir = crate::data_path()?.join("shopping-lists");
    std::fs::create_dir_all(&lists_dir)?;
    let list_path = lists_dir.join(format!(
        "shopping-list-{}-{}.rtf",
        order.id, order.order_date
    ));
    std::fs::write(&list_path, shopping_list_rich_text(order, list))?;
    log::info!("exported shopping list to {}", list_path.display());
    open::that(&list_path)?;
    Ok(list_path)
}

#[test]
fn escape_non_ascii() {
    assert_eq!(escape("arroz: 800g"), "arroz: 800g");
    assert_eq!(escape("óleo: 70g"), "\\u243?leo: 70g");
    assert_eq!(escape("{a}\\"), "\\{a\\}\\\\");
}

#[test]
fn shopping_list_document() {
    use crate::database::models::{OrderId, UserId};

    let order = Order {
        id: OrderId(7),
        user_id: UserId(1),
        order_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
    };
    let list = crate::shopping_list::aggregate([
        ("arroz".to_owned(), 400.0, 2.0),
        ("alho".to_owned(), 10.0, 2.0),
        ("alho".to_owned(), 15.0, 1.0),
    ]);

    let text = shopping_list_rich_text(&order, &list);
    assert!(text.starts_with("{\\rtf1\n"));
    assert!(text.contains("Shopping List for Order #7"));
    assert!(text.contains("served on the 14, June 2025"));
    assert!(text.ends_with("\\\nalho: 35g\\\narroz: 800g}"));

    let empty = shopping_list_rich_text(&order, &ShoppingList::default());
    assert!(empty.ends_with("Nothing to buy}"));
}

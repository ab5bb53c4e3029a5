// Fixed demonstration sequence: a product opens at 400, two buyers watch it
// drop to 320 and then 280, and the price trail accumulates in the list.
// Afterwards the container is walked on its own.

use colored::Colorize;
use pricewatch::{Buyer, IntList, Product, WatchError, Wholesaler};

fn main() -> Result<(), WatchError> {
    println!("{}", "=== Price watch ===".bold());

    let mut product = Product::new("industrial widget", 400.0)?;
    product.subscribe(Box::new(Wholesaler::new()));
    product.subscribe(Box::new(Buyer::new()));
    println!(
        "{} opens at {}, {} observers watching",
        product.name(),
        format!("{:.2}", product.price()).yellow(),
        product.observer_count()
    );

    for new_price in [320.0, 280.0] {
        println!();
        println!("price drops to {}", format!("{new_price:.2}").yellow());
        for departed in product.change_price(new_price)? {
            println!("  {} {} bought at {new_price:.2}", "*".green(), departed.label());
        }
        print!("  history so far:");
        for price in product.history() {
            print!(" {price}");
        }
        println!();
    }

    println!();
    println!("{}", "=== Container walkthrough ===".bold());

    // Append 10, 9, 11 and walk the chain front to back.
    let mut list = IntList::new();
    list.push_back(10);
    list.push_back(9);
    list.push_back(11);
    println!("appended 10, 9, 11 -> len {}", list.len());
    print!("traversal:");
    for v in &list {
        print!(" {v}");
    }
    println!();

    for v in &mut list {
        *v *= 2;
    }
    println!("doubled in place: {list:?}");

    // A cursor keeps its footing while the list grows under it.
    let mut cursor = list.cursor_front_mut();
    while !cursor.at_end() {
        if cursor.current() == Some(&22) {
            cursor.push_back(44);
        }
        cursor.move_next();
    }
    println!("grown mid-walk:    {list:?}");

    println!();
    println!("{}", "done".green().bold());
    Ok(())
}

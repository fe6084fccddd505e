//! # Interactive Menu
//!
//! The text front end over a [`Store`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Welcome to Best Buy!                                                   │
//! │  1. List all products in store   ──► list_active_products + describe   │
//! │  2. Show total amount in store   ──► total_active_quantity             │
//! │  3. Make an order                ──► name/quantity prompts             │
//! │                                       └──► process_order               │
//! │  4. Quit                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The menu reads from any `BufRead` and writes to any `Write`, so tests
//! drive it with an in-memory script. End of input behaves like `4`.

use std::io::{self, BufRead, Write};

use storefront_core::{OrderLine, Store};
use tracing::{info, warn};

/// One menu session bound to an input and output stream.
pub struct Menu<'a, R, W> {
    store: &'a Store,
    store_name: &'a str,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a Store, store_name: &'a str, input: R, output: W) -> Self {
        Menu {
            store,
            store_name,
            input,
            output,
        }
    }

    /// Runs until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\nWelcome to {}!", self.store_name)?;
            writeln!(self.output, "1. List all products in store")?;
            writeln!(self.output, "2. Show total amount in store")?;
            writeln!(self.output, "3. Make an order")?;
            writeln!(self.output, "4. Quit")?;

            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.list_products()?,
                "2" => self.show_total_quantity()?,
                "3" => self.make_order()?,
                "4" => break,
                other => {
                    writeln!(self.output, "Invalid choice '{}'. Please try again.", other)?;
                }
            }
        }

        writeln!(self.output, "Thank you for visiting the store!")?;
        self.output.flush()
    }

    /// Prints `text` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn list_products(&mut self) -> io::Result<()> {
        let active = self.store.list_active_products();
        writeln!(self.output, "\nAll active products in the store:")?;
        if active.is_empty() {
            writeln!(self.output, "(none)")?;
        }
        for (index, product) in active.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, product.describe())?;
        }
        Ok(())
    }

    fn show_total_quantity(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "\nTotal quantity of items in the store: {}",
            self.store.total_active_quantity()
        )
    }

    fn make_order(&mut self) -> io::Result<()> {
        let mut shopping_list = Vec::new();

        loop {
            let Some(name) = self.prompt("Enter the product name (or 'done' to finish): ")? else {
                break;
            };
            if name.is_empty() || name.eq_ignore_ascii_case("done") {
                break;
            }

            let Some(product) = self
                .store
                .products()
                .iter()
                .find(|p| p.name() == name)
                .cloned()
            else {
                writeln!(self.output, "Product {} not found in the store.", name)?;
                continue;
            };

            let Some(raw) = self.prompt(&format!("Enter the quantity for {}: ", name))? else {
                break;
            };
            match raw.parse::<i64>() {
                Ok(quantity) => shopping_list.push(OrderLine::new(&product, quantity)),
                Err(_) => {
                    writeln!(self.output, "Invalid quantity '{}', skipping {}.", raw, name)?;
                }
            }
        }

        if shopping_list.is_empty() {
            writeln!(self.output, "No items ordered.")?;
            return Ok(());
        }

        match self.store.process_order(&shopping_list) {
            Ok(total) => {
                info!(lines = shopping_list.len(), total = %total, "Order completed");
                writeln!(self.output, "Total price for the order: {}", total)
            }
            Err(e) => {
                warn!(error = %e, "Order failed");
                writeln!(
                    self.output,
                    "An error occurred while processing the order: {}",
                    e
                )
            }
        }
    }
}

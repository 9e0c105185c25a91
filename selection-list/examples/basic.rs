//! Selection List Example
//!
//! Demonstrates the selection list without any UI:
//! - Mixed construction from pairs and entries
//! - Disabled entries ignoring selection changes
//! - Bulk select/deselect
//! - A change handler reacting to (and mutating) the list
//!
//! Logs go to `selection_list.log`.

use std::fs::File;

use log::LevelFilter;
use selection_list::prelude::*;
use simplelog::{Config, WriteLogger};

// ============================================================================
// Topping
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
enum Topping {
    Cheese,
    Mushroom,
    Olive,
    Pineapple,
}

fn toppings() -> Result<SelectionList<Topping>, SelectionListError> {
    SelectionList::with_config(
        vec![
            EntrySpec::from((Topping::Cheese, "Cheese")),
            Entry::new(Topping::Mushroom, "Mushroom")
                .with_id("mushroom")
                .selected()
                .into(),
            Entry::new(Topping::Olive, "Olive").with_id("olive").into(),
            Entry::new(Topping::Pineapple, "Pineapple (sold out)")
                .with_id("pineapple")
                .disabled()
                .into(),
        ],
        ListConfig::new().name("toppings").classes("pizza compact"),
    )
}

fn print_list(list: &SelectionList<Topping>) {
    for entry in list.iter() {
        let mark = if entry.is_selected() { "[x]" } else { "[ ]" };
        let note = if entry.is_disabled() { " (disabled)" } else { "" };
        println!("  {} {}{}", mark, entry.prompt(), note);
    }
}

fn main() -> Result<(), SelectionListError> {
    // Initialize file logging
    if let Ok(log_file) = File::create("selection_list.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, Config::default(), log_file);
    }

    let mut list = toppings()?;

    // Olives and mushrooms don't go together here.
    list.on_selected_changed(|list, event| {
        println!("selection changed: {:?}", event.selected);
        if event.selected.contains(&Topping::Olive)
            && event.selected.contains(&Topping::Mushroom)
        {
            let _ = list.deselect("mushroom");
        }
    });

    println!("initial:");
    print_list(&list);

    list.select("olive")?;
    list.select("pineapple")?;
    list.toggle(0)?;

    println!("after picking:");
    print_list(&list);

    list.select_all();
    list.deselect_all();
    println!("after clearing: {:?}", list.selected_values());

    Ok(())
}

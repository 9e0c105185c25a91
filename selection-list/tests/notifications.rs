use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use selection_list::{Entry, SelectedChanged, SelectionList};

type Log = Rc<RefCell<Vec<Vec<i32>>>>;

fn recorded(list: &mut SelectionList<i32>) -> Log {
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    list.on_selected_changed(move |_, event| sink.borrow_mut().push(event.selected.clone()));
    log
}

fn sample() -> SelectionList<i32> {
    SelectionList::new(vec![
        Entry::new(1, "a"),
        Entry::new(2, "b").selected(),
        Entry::new(3, "c").disabled(),
    ])
    .unwrap()
}

// ============================================================================
// Delivery
// ============================================================================

#[test]
fn test_select_notifies_with_selected_values() {
    let mut list = sample();
    let log = recorded(&mut list);

    list.select(0).unwrap();
    assert_eq!(*log.borrow(), vec![vec![1, 2]]);
}

#[test]
fn test_event_carries_list_id() {
    let mut list = sample();
    let expected = list.id();
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    list.on_selected_changed(move |_, event: &SelectedChanged<i32>| {
        *sink.borrow_mut() = Some(event.list_id);
    });

    list.deselect(1).unwrap();
    assert_eq!(*seen.borrow(), Some(expected));
}

#[test]
fn test_repeated_select_notifies_every_time() {
    let mut list = sample();
    let log = recorded(&mut list);

    list.select(1).unwrap();
    list.select(1).unwrap();
    assert_eq!(*log.borrow(), vec![vec![2], vec![2]]);
}

#[test]
fn test_disabled_target_does_not_notify() {
    let mut list = sample();
    let log = recorded(&mut list);

    list.select(2).unwrap();
    list.deselect(2).unwrap();
    list.toggle(2).unwrap();
    assert!(log.borrow().is_empty());
}

#[test]
fn test_failed_lookup_does_not_notify() {
    let mut list = sample();
    let log = recorded(&mut list);

    assert!(list.select(10).is_err());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_bulk_operations_notify_once() {
    let mut list = sample();
    let log = recorded(&mut list);

    list.select_all();
    list.toggle_all();
    list.deselect_all();
    assert_eq!(*log.borrow(), vec![vec![1, 2], vec![], vec![]]);
}

#[test]
fn test_enable_disable_do_not_notify() {
    let mut list = sample();
    let log = recorded(&mut list);

    list.enable(2).unwrap();
    list.disable(0).unwrap();
    assert!(log.borrow().is_empty());
}

#[test]
fn test_structural_changes_notify_only_when_selection_changes() {
    let mut list = sample();
    let log = recorded(&mut list);

    list.add_entry((4, "d")).unwrap();
    list.remove_entry(0).unwrap();
    assert!(log.borrow().is_empty());

    list.add_entry(Entry::new(5, "e").selected()).unwrap();
    list.remove_entry(0).unwrap();
    assert_eq!(*log.borrow(), vec![vec![2, 5], vec![5]]);

    list.clear_entries();
    assert_eq!(log.borrow().last(), Some(&vec![]));
}

// ============================================================================
// Subscriptions
// ============================================================================

#[test]
fn test_unsubscribe() {
    let mut list = sample();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = list.on_selected_changed(move |_, _| *sink.borrow_mut() += 1);

    list.select(0).unwrap();
    assert!(list.unsubscribe(id));
    assert!(!list.unsubscribe(id));
    list.select(0).unwrap();

    assert_eq!(*count.borrow(), 1);
    assert_eq!(list.subscriber_count(), 0);
}

#[test]
fn test_handlers_run_in_registration_order() {
    let mut list = sample();
    let order = Rc::new(RefCell::new(Vec::new()));
    for name in ["first", "second"] {
        let sink = Rc::clone(&order);
        list.on_selected_changed(move |_, _| sink.borrow_mut().push(name));
    }

    list.toggle(0).unwrap();
    assert_eq!(*order.borrow(), vec!["first", "second"]);
}

// ============================================================================
// Re-entrancy
// ============================================================================

#[test]
fn test_handler_can_mutate_list() {
    let mut list = sample();
    // Selecting "a" drags "b" out of the selection.
    list.on_selected_changed(|list, event| {
        if event.selected.contains(&1) && list.is_selected(1).unwrap_or(false) {
            list.deselect(1).unwrap();
        }
    });
    let log = recorded(&mut list);

    list.select(0).unwrap();

    assert_eq!(list.selected_values(), vec![1]);
    // Outer change first, then the nested one, all before select returned.
    assert_eq!(*log.borrow(), vec![vec![1, 2], vec![1]]);
}

#[test]
fn test_handler_can_remove_entries() {
    let mut list = SelectionList::new(vec![
        Entry::new(1, "a").with_id("a"),
        Entry::new(2, "b").with_id("b"),
        Entry::new(3, "c").with_id("c"),
    ])
    .unwrap();
    list.on_selected_changed(|list, _| {
        if list.entry_by_id("a").is_ok() {
            list.remove_entry("a").unwrap();
        }
    });

    list.select("c").unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list.index_of("c"), Ok(1));
    assert_eq!(list.selected_values(), vec![3]);
}

#[test]
fn test_handler_can_unsubscribe_itself() {
    let mut list = sample();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let own_id = Rc::new(RefCell::new(None));
    let own_id_in = Rc::clone(&own_id);
    let id = list.on_selected_changed(move |list, _| {
        *sink.borrow_mut() += 1;
        if let Some(id) = own_id_in.borrow_mut().take() {
            list.unsubscribe(id);
        }
    });
    *own_id.borrow_mut() = Some(id);

    list.select(0).unwrap();
    list.select(0).unwrap();

    assert_eq!(*count.borrow(), 1);
    assert_eq!(list.subscriber_count(), 0);
}

#[test]
fn test_handler_added_during_dispatch_sees_later_events() {
    let mut list = sample();
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    let mut registered = false;
    list.on_selected_changed(move |list, _| {
        if !registered {
            registered = true;
            let sink = Rc::clone(&sink);
            list.on_selected_changed(move |_, event| sink.borrow_mut().push(event.selected.clone()));
        }
    });

    list.select(0).unwrap();
    assert!(log.borrow().is_empty());

    list.deselect(0).unwrap();
    assert_eq!(*log.borrow(), vec![vec![2]]);
}

// ============================================================================
// Panicking handlers
// ============================================================================

#[test]
fn test_delivery_resumes_after_handler_panic() {
    let mut list = sample();
    let armed = Rc::new(Cell::new(true));
    let trigger = Rc::clone(&armed);
    list.on_selected_changed(move |_, _| {
        if trigger.get() {
            panic!("handler failed");
        }
    });
    let count = Rc::new(Cell::new(0));
    let sink = Rc::clone(&count);
    list.on_selected_changed(move |_, _| sink.set(sink.get() + 1));

    let result = panic::catch_unwind(AssertUnwindSafe(|| list.select(0)));
    assert!(result.is_err());
    // The panic stopped delivery before the second handler.
    assert_eq!(count.get(), 0);

    armed.set(false);
    list.select(1).unwrap();
    assert_eq!(count.get(), 1);
    assert_eq!(list.selected_values(), vec![1, 2]);
}

#[test]
fn test_nested_events_dropped_after_handler_panic() {
    let mut list = sample();
    let armed = Rc::new(Cell::new(true));
    let trigger = Rc::clone(&armed);
    // Queue a nested change, then fail before it is delivered.
    list.on_selected_changed(move |list, _| {
        if trigger.get() {
            trigger.set(false);
            list.toggle(1).unwrap();
            panic!("handler failed");
        }
    });
    let log = recorded(&mut list);

    let result = panic::catch_unwind(AssertUnwindSafe(|| list.select(0)));
    assert!(result.is_err());
    assert!(log.borrow().is_empty());

    list.select(0).unwrap();
    // Only the fresh event arrives, not the one queued before the panic.
    assert_eq!(*log.borrow(), vec![vec![1]]);
}

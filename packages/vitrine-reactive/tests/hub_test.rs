use std::cell::{Cell, RefCell};
use std::rc::Rc;
use vitrine_reactive::ChangeHub;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Ev {
    A,
    B,
}

#[test]
fn test_publish_delivers_in_subscription_order() {
    let hub = ChangeHub::new();
    let log: Rc<RefCell<Vec<(&str, Ev)>>> = Rc::new(RefCell::new(Vec::new()));
    let log2 = log.clone();
    let log3 = log.clone();

    hub.subscribe(move |ev| log2.borrow_mut().push(("first", ev)));
    hub.subscribe(move |ev| log3.borrow_mut().push(("second", ev)));

    hub.publish(Ev::A);

    assert_eq!(*log.borrow(), vec![("first", Ev::A), ("second", Ev::A)]);
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let hub = ChangeHub::new();
    let count = Rc::new(Cell::new(0));
    let count2 = count.clone();

    let id = hub.subscribe(move |_: Ev| count2.set(count2.get() + 1));
    hub.publish(Ev::A);
    assert!(hub.unsubscribe(id));
    hub.publish(Ev::A);

    assert_eq!(count.get(), 1);
    assert!(!hub.unsubscribe(id), "second unsubscribe should be a no-op");
    assert_eq!(hub.subscriber_count(), 0);
}

#[test]
fn test_batch_defers_and_coalesces() {
    let hub = ChangeHub::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let log2 = log.clone();

    hub.subscribe(move |ev| log2.borrow_mut().push(ev));

    hub.batch(|| {
        hub.publish(Ev::A);
        hub.publish(Ev::B);
        hub.publish(Ev::A);
        assert!(log.borrow().is_empty(), "nothing delivered inside the batch");
    });

    // Duplicate A coalesced into its first position.
    assert_eq!(*log.borrow(), vec![Ev::A, Ev::B]);
}

#[test]
fn test_nested_batches_flush_once() {
    let hub = ChangeHub::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let log2 = log.clone();

    hub.subscribe(move |ev| log2.borrow_mut().push(ev));

    hub.batch(|| {
        hub.publish(Ev::A);
        hub.batch(|| hub.publish(Ev::B));
        assert!(log.borrow().is_empty(), "inner batch must not flush");
    });

    assert_eq!(*log.borrow(), vec![Ev::A, Ev::B]);
}

#[test]
fn test_reentrant_publish_is_deferred() {
    let hub = Rc::new(ChangeHub::new());
    let log = Rc::new(RefCell::new(Vec::new()));

    let log2 = log.clone();
    let hub2 = hub.clone();
    let fired = Cell::new(false);
    hub.subscribe(move |ev| {
        log2.borrow_mut().push(("first", ev));
        if ev == Ev::A && !fired.get() {
            fired.set(true);
            hub2.publish(Ev::B);
        }
    });

    let log3 = log.clone();
    hub.subscribe(move |ev| log3.borrow_mut().push(("second", ev)));

    hub.publish(Ev::A);

    // A finishes its full fan-out before B starts.
    assert_eq!(
        *log.borrow(),
        vec![
            ("first", Ev::A),
            ("second", Ev::A),
            ("first", Ev::B),
            ("second", Ev::B),
        ]
    );
}

#[test]
fn test_subscriber_added_during_delivery_sees_only_later_events() {
    let hub = Rc::new(ChangeHub::new());
    let log = Rc::new(RefCell::new(Vec::new()));

    let hub2 = hub.clone();
    let log2 = log.clone();
    let added = Cell::new(false);
    hub.subscribe(move |ev| {
        if !added.get() {
            added.set(true);
            let log3 = log2.clone();
            hub2.subscribe(move |late| log3.borrow_mut().push(("late", late)));
            hub2.publish(Ev::B);
        }
        log2.borrow_mut().push(("early", ev));
    });

    hub.publish(Ev::A);

    assert_eq!(
        *log.borrow(),
        vec![("early", Ev::A), ("early", Ev::B), ("late", Ev::B)]
    );
}

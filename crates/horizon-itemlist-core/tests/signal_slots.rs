//! Integration tests for parent/child wiring through signals.

use std::sync::Arc;

use horizon_itemlist_core::{ConnectionGuard, Signal};
use parking_lot::Mutex;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

struct Child {
    picked: Signal<usize>,
}

struct Parent {
    log: Arc<Mutex<Vec<usize>>>,
    _conn: ConnectionGuard<usize>,
}

impl Parent {
    fn wire(child: &Child) -> Self {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let conn = child.picked.connect_scoped(move |&index| sink.lock().push(index));
        Self { log, _conn: conn }
    }
}

#[test]
fn test_parent_receives_child_signals() {
    setup();

    let child = Child {
        picked: Signal::new(),
    };
    let parent = Parent::wire(&child);

    child.picked.emit(2);
    child.picked.emit(0);

    assert_eq!(*parent.log.lock(), vec![2, 0]);
}

#[test]
fn test_dropping_parent_disconnects() {
    setup();

    let child = Child {
        picked: Signal::new(),
    };
    let parent = Parent::wire(&child);
    assert_eq!(child.picked.connection_count(), 1);

    drop(parent);
    assert_eq!(child.picked.connection_count(), 0);

    child.picked.emit(1);
}

#[test]
fn test_slots_run_in_connection_order() {
    setup();

    let signal = Signal::<()>::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for tag in ["first", "second", "third"] {
        let order = order.clone();
        signal.connect(move |_| order.lock().push(tag));
    }

    signal.emit(());

    assert_eq!(*order.lock(), vec!["first", "second", "third"]);
}

#[test]
fn test_order_kept_after_disconnect_and_reconnect() {
    setup();

    let signal = Signal::<()>::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    let mut ids = Vec::new();
    for tag in ["a", "b", "c"] {
        let order = order.clone();
        ids.push(signal.connect(move |_| order.lock().push(tag)));
    }
    signal.disconnect(ids[0]);
    signal.disconnect(ids[1]);
    for tag in ["d", "e"] {
        let order = order.clone();
        signal.connect(move |_| order.lock().push(tag));
    }

    signal.emit(());

    assert_eq!(*order.lock(), vec!["c", "d", "e"]);
}

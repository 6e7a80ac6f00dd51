use hooklab::hooks::Debounced;
use hooklab::scheduler::{EventLoop, ManualScheduler};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn rapid_fire_updates_settle_once_to_the_last_value() {
    let scheduler = Rc::new(ManualScheduler::new());
    let mut value = Debounced::new(0, 500, scheduler.clone()).unwrap();
    let settlements = Rc::new(Cell::new(0));
    let counter = settlements.clone();
    value.on_settle(move |_| counter.set(counter.get() + 1));

    for input in [1, 2, 3] {
        value.update(input);
        scheduler.advance(ms(10));
    }

    // Last update at t=20ms; settlement due at t=520ms.
    scheduler.advance(ms(489));
    assert_eq!(value.read(), 0);
    assert_eq!(settlements.get(), 0);

    scheduler.advance(ms(1));
    assert_eq!(value.read(), 3);
    assert_eq!(settlements.get(), 1);

    scheduler.advance(ms(5_000));
    assert_eq!(settlements.get(), 1);
}

#[test]
fn settled_value_is_stable_after_quiet_period() {
    let scheduler = Rc::new(ManualScheduler::new());
    let mut value = Debounced::new("seed", 100, scheduler.clone()).unwrap();

    value.update("a");
    scheduler.advance(ms(100));
    assert_eq!(value.read(), "a");

    // Between settlements the exposed value does not move.
    value.update("b");
    for _ in 0..9 {
        scheduler.advance(ms(10));
        assert_eq!(value.read(), "a");
    }
    scheduler.advance(ms(10));
    assert_eq!(value.read(), "b");

    for _ in 0..10 {
        scheduler.advance(ms(100));
        assert_eq!(value.read(), "b");
    }
}

#[test]
fn disposal_prevents_late_settlement() {
    let scheduler = Rc::new(ManualScheduler::new());
    let fired = Rc::new(Cell::new(false));

    let mut value = Debounced::new(0, 250, scheduler.clone()).unwrap();
    let flag = fired.clone();
    value.on_settle(move |_| flag.set(true));
    value.update(42);

    value.dispose();
    assert_eq!(scheduler.advance(ms(1_000)), 0);
    assert!(!fired.get());
    assert_eq!(value.read(), 0);
}

#[test]
fn works_against_the_wall_clock_loop() {
    let event_loop = Rc::new(EventLoop::new());
    let mut value = Debounced::new(String::new(), 200, event_loop.clone()).unwrap();

    value.update("ru".to_string());
    value.update("rust".to_string());
    assert_eq!(event_loop.turn(), 0);
    assert_eq!(value.read(), "");

    assert_eq!(event_loop.run_until_idle(), 1);
    assert_eq!(value.read(), "rust");
}

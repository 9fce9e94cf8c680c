use std::cell::RefCell;
use std::rc::Rc;

use gesture_core::{GesturePriority, GestureRecognizer, RefereeState, TouchPoint};
use gesture_recognizers::{
    GestureCallbacks, PanDirection, PanRecognizer, PinchRecognizer, TapRecognizer,
};
use gesture_testing::TouchDriver;

type Log = Rc<RefCell<Vec<String>>>;

fn record(log: &Log, entry: String) {
    log.borrow_mut().push(entry);
}

#[test]
fn pan_drives_start_update_end_callbacks() {
    let log: Log = Log::default();
    let callbacks = GestureCallbacks::new()
        .on_start({
            let log = log.clone();
            move |e| record(&log, format!("start:{:.0}", e.offset_x))
        })
        .on_update({
            let log = log.clone();
            move |e| record(&log, format!("update:{:.0}", e.offset_x))
        })
        .on_end({
            let log = log.clone();
            move |e| record(&log, format!("end:{:.0}", e.offset_x))
        });
    let pan = Rc::new(RefCell::new(
        PanRecognizer::new(1, PanDirection::All, 5.0).with_callbacks(callbacks),
    ));
    let mut driver = TouchDriver::new();
    driver.add(&pan);

    driver.run([
        TouchPoint::down(1, 0.0, 0.0),
        TouchPoint::moved(1, 10.0, 0.0),
        TouchPoint::moved(1, 20.0, 0.0),
        TouchPoint::up(1, 20.0, 0.0),
    ]);

    assert_eq!(&*log.borrow(), &["start:10", "update:20", "end:20"]);
    assert_eq!(pan.borrow().referee_state(), RefereeState::Succeed);
    assert!(!driver.referee().has_scope(1));
}

#[test]
fn tap_wins_when_pan_never_crosses_its_threshold() {
    let log: Log = Log::default();
    let tap = Rc::new(RefCell::new(TapRecognizer::new(1, 3.0).with_callbacks(
        GestureCallbacks::new().on_start({
            let log = log.clone();
            move |_| record(&log, "tap".into())
        }),
    )));
    let pan = Rc::new(RefCell::new(PanRecognizer::new(1, PanDirection::All, 5.0)));
    let mut driver = TouchDriver::new();
    driver.add(&pan);
    driver.add(&tap);

    driver.run([
        TouchPoint::down(1, 0.0, 0.0),
        TouchPoint::moved(1, 1.0, 0.0),
        TouchPoint::up(1, 1.0, 0.0),
    ]);

    assert_eq!(tap.borrow().referee_state(), RefereeState::Succeed);
    assert_eq!(pan.borrow().referee_state(), RefereeState::Fail);
    assert_eq!(&*log.borrow(), &["tap"]);
}

#[test]
fn high_priority_pan_preempts_low_priority_tap() {
    let tap_log: Log = Log::default();
    let tap = Rc::new(RefCell::new(
        TapRecognizer::new(1, 3.0).with_callbacks(GestureCallbacks::new().on_start({
            let log = tap_log.clone();
            move |_| record(&log, "tap".into())
        })),
    ));
    let pan = Rc::new(RefCell::new(
        PanRecognizer::new(1, PanDirection::All, 5.0).with_priority(GesturePriority::High),
    ));
    let mut driver = TouchDriver::new();
    driver.add(&pan);
    driver.add(&tap);

    driver.run([TouchPoint::down(1, 0.0, 0.0), TouchPoint::moved(1, 10.0, 0.0)]);

    assert_eq!(pan.borrow().referee_state(), RefereeState::Succeed);
    assert_eq!(tap.borrow().referee_state(), RefereeState::Fail);

    driver.run([TouchPoint::up(1, 10.0, 0.0)]);
    assert!(tap_log.borrow().is_empty());
}

#[test]
fn pinch_reports_scale_across_both_finger_scopes() {
    let log: Log = Log::default();
    let callbacks = GestureCallbacks::new()
        .on_start({
            let log = log.clone();
            move |e| record(&log, format!("start:{:.2}", e.scale))
        })
        .on_end({
            let log = log.clone();
            move |e| record(&log, format!("end:{:.2}", e.scale))
        });
    let pinch = Rc::new(RefCell::new(
        PinchRecognizer::new(2, 10.0).with_callbacks(callbacks),
    ));
    let mut driver = TouchDriver::new();
    driver.add(&pinch);

    driver.run([
        TouchPoint::down(1, 0.0, 0.0),
        TouchPoint::down(2, 100.0, 0.0),
        TouchPoint::moved(2, 140.0, 0.0),
        TouchPoint::up(2, 140.0, 0.0),
        TouchPoint::up(1, 0.0, 0.0),
    ]);

    assert_eq!(&*log.borrow(), &["start:1.40", "end:1.40"]);
    assert!(!driver.referee().has_scope(1));
    assert!(!driver.referee().has_scope(2));
}

#[test]
fn two_finger_tap_survives_the_first_finger_scope_teardown() {
    let log: Log = Log::default();
    let tap = Rc::new(RefCell::new(TapRecognizer::new(2, 3.0).with_callbacks(
        GestureCallbacks::new().on_start({
            let log = log.clone();
            move |_| record(&log, "tap".into())
        }),
    )));
    let mut driver = TouchDriver::new();
    driver.add(&tap);

    driver.run([
        TouchPoint::down(1, 10.0, 10.0),
        TouchPoint::down(2, 50.0, 10.0),
        TouchPoint::up(1, 10.0, 10.0),
        TouchPoint::up(2, 50.0, 10.0),
    ]);

    assert_eq!(&*log.borrow(), &["tap"]);
    assert_eq!(tap.borrow().referee_state(), RefereeState::Succeed);
    assert!(!driver.referee().has_scope(1));
    assert!(!driver.referee().has_scope(2));
}

#[test]
fn gesture_events_carry_the_sample_timestamp() {
    let log: Log = Log::default();
    let callbacks = GestureCallbacks::new()
        .on_start({
            let log = log.clone();
            move |e| record(&log, format!("start@{}", e.timestamp))
        })
        .on_update({
            let log = log.clone();
            move |e| record(&log, format!("update@{}", e.timestamp))
        })
        .on_end({
            let log = log.clone();
            move |e| record(&log, format!("end@{}", e.timestamp))
        });
    let pan = Rc::new(RefCell::new(
        PanRecognizer::new(1, PanDirection::All, 5.0).with_callbacks(callbacks),
    ));
    let mut driver = TouchDriver::new();
    driver.add(&pan);

    driver.run([
        TouchPoint::down(1, 0.0, 0.0).at(1),
        TouchPoint::moved(1, 10.0, 0.0).at(2),
        TouchPoint::moved(1, 20.0, 0.0).at(3),
        TouchPoint::up(1, 20.0, 0.0).at(4),
    ]);

    // the end event keeps the last move's timestamp
    assert_eq!(&*log.borrow(), &["start@2", "update@3", "end@3"]);
}

#[test]
fn tap_event_carries_the_lift_timestamp() {
    let log: Log = Log::default();
    let tap = Rc::new(RefCell::new(TapRecognizer::new(1, 3.0).with_callbacks(
        GestureCallbacks::new().on_start({
            let log = log.clone();
            move |e| record(&log, format!("tap@{}", e.timestamp))
        }),
    )));
    let mut driver = TouchDriver::new();
    driver.add(&tap);

    driver.run([
        TouchPoint::down(1, 10.0, 10.0).at(5),
        TouchPoint::up(1, 10.0, 10.0).at(9),
    ]);

    assert_eq!(&*log.borrow(), &["tap@9"]);
}

#[test]
fn cancel_after_acceptance_fires_cancel_callback() {
    let log: Log = Log::default();
    let callbacks = GestureCallbacks::new().on_cancel({
        let log = log.clone();
        move || record(&log, "cancel".into())
    });
    let pan = Rc::new(RefCell::new(
        PanRecognizer::new(1, PanDirection::All, 5.0).with_callbacks(callbacks),
    ));
    let mut driver = TouchDriver::new();
    driver.add(&pan);

    driver.run([
        TouchPoint::down(1, 0.0, 0.0),
        TouchPoint::moved(1, 10.0, 0.0),
        TouchPoint::cancel(1, 10.0, 0.0),
    ]);

    assert_eq!(&*log.borrow(), &["cancel"]);
}

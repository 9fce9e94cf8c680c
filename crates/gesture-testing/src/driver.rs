//! Scripted stand-in for the input dispatch loop.
//!
//! The production input manager is outside this workspace; tests still need
//! something that performs its duties: registering recognizers when a touch
//! sequence starts, forwarding raw samples, routing verdicts to the referee,
//! and cleaning the scope when the sequence ends.

use std::cell::RefCell;
use std::rc::Rc;

use gesture_core::{
    GestureDisposal, GestureRecognizer, GestureReferee, RecognizerHandle, TouchHandler, TouchPhase,
    TouchPoint,
};

struct Member {
    handle: RecognizerHandle,
    handler: Rc<RefCell<dyn TouchHandler>>,
}

/// Feeds touch sequences through a set of recognizers and a referee.
#[derive(Default)]
pub struct TouchDriver {
    referee: GestureReferee,
    members: Vec<Member>,
}

impl TouchDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recognizer that will participate in every touch sequence this
    /// driver dispatches.
    pub fn add<R>(&mut self, recognizer: &Rc<RefCell<R>>)
    where
        R: GestureRecognizer + TouchHandler + 'static,
    {
        self.members.push(Member {
            handle: recognizer.clone(),
            handler: recognizer.clone(),
        });
    }

    /// Dispatches one raw sample: registers members on `Down`, forwards the
    /// sample to every member, routes returned verdicts to the referee, and
    /// cleans the scope after `Up`/`Cancel`.
    pub fn dispatch(&mut self, point: TouchPoint) {
        if point.phase == TouchPhase::Down {
            for member in &self.members {
                self.referee.add_gesture_recognizer(point.id, &member.handle);
            }
        }

        // collect verdicts before adjudicating so no recognizer is borrowed
        // while the referee runs its callbacks
        let mut verdicts: Vec<(RecognizerHandle, GestureDisposal)> = Vec::new();
        for member in &self.members {
            if let Some(disposal) = member.handler.borrow_mut().handle_touch(&point) {
                verdicts.push((member.handle.clone(), disposal));
            }
        }
        for (handle, disposal) in verdicts {
            self.referee.adjudicate(point.id, &handle, disposal);
        }

        if matches!(point.phase, TouchPhase::Up | TouchPhase::Cancel) {
            self.referee.clean_gesture_scope(point.id);
        }
    }

    /// Dispatches a whole scripted sequence in order.
    pub fn run(&mut self, script: impl IntoIterator<Item = TouchPoint>) {
        for point in script {
            self.dispatch(point);
        }
    }

    pub fn referee(&mut self) -> &mut GestureReferee {
        &mut self.referee
    }
}

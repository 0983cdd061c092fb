//! Pan gesture recogniser.
//!
//! Turns one pointer's raw stream into a start/active/end/fail transaction:
//!
//! ```text
//! Idle --Down--> Armed --Move beyond slop--> Active --Up--> Idle (End)
//!                  |                            |
//!                  +--Up / Cancel--> Idle (Fail) +--Cancel--> Idle (Fail)
//! ```
//!
//! Translations are cumulative from the Down position, so the slop travelled
//! before activation is not lost.

use smallvec::SmallVec;
use swipedeck_ui_graphics::{Point, Velocity};

use crate::gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
use crate::nodes::input::types::{PointerEvent, PointerEventKind, PointerId};
use crate::velocity_tracker::VelocityTracker;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanEvent {
    /// The pointer moved beyond the touch slop; the gesture owns it now.
    Start,
    /// Cumulative translation since the press.
    Active { translation: Point },
    /// Released while active.
    End {
        translation: Point,
        velocity: Velocity,
    },
    /// Released before activation, or cancelled by the platform.
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PanState {
    Idle,
    Armed { pointer: PointerId, origin: Point },
    Active { pointer: PointerId, origin: Point },
}

pub type PanEvents = SmallVec<[PanEvent; 2]>;

pub struct PanGestureRecognizer {
    state: PanState,
    tracker: VelocityTracker,
    touch_slop: f32,
    max_velocity: f32,
}

impl Default for PanGestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PanGestureRecognizer {
    pub fn new() -> Self {
        Self {
            state: PanState::Idle,
            tracker: VelocityTracker::new(),
            touch_slop: DRAG_THRESHOLD,
            max_velocity: MAX_FLING_VELOCITY,
        }
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop.max(0.0);
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, PanState::Active { .. })
    }

    /// The pointer this recogniser is following, if any.
    pub fn tracked_pointer(&self) -> Option<PointerId> {
        match self.state {
            PanState::Idle => None,
            PanState::Armed { pointer, .. } | PanState::Active { pointer, .. } => Some(pointer),
        }
    }

    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> PanEvents {
        let mut out = PanEvents::new();

        if let Some(pointer) = self.tracked_pointer() {
            if pointer != event.id {
                return out;
            }
        }

        match (self.state, event.kind) {
            (PanState::Idle, PointerEventKind::Down) => {
                self.tracker.reset();
                self.tracker.add_position(event.uptime_millis, event.position);
                self.state = PanState::Armed {
                    pointer: event.id,
                    origin: event.position,
                };
            }
            (PanState::Idle, _) => {}
            (PanState::Armed { pointer, origin }, PointerEventKind::Move) => {
                self.tracker.add_position(event.uptime_millis, event.position);
                if event.position.distance(origin) > self.touch_slop {
                    self.state = PanState::Active { pointer, origin };
                    log::debug!("pan {pointer}: activated");
                    out.push(PanEvent::Start);
                    out.push(PanEvent::Active {
                        translation: event.position - origin,
                    });
                }
            }
            (PanState::Active { origin, .. }, PointerEventKind::Move) => {
                self.tracker.add_position(event.uptime_millis, event.position);
                out.push(PanEvent::Active {
                    translation: event.position - origin,
                });
            }
            (PanState::Active { pointer, origin }, PointerEventKind::Up) => {
                self.tracker.add_position(event.uptime_millis, event.position);
                let velocity = self.tracker.calculate_velocity(self.max_velocity);
                let translation = event.position - origin;
                log::debug!("pan {pointer}: end at {translation:?}, velocity {velocity:?}");
                out.push(PanEvent::End {
                    translation,
                    velocity,
                });
                self.reset();
            }
            (PanState::Armed { pointer, .. }, PointerEventKind::Up)
            | (PanState::Armed { pointer, .. }, PointerEventKind::Cancel)
            | (PanState::Active { pointer, .. }, PointerEventKind::Cancel) => {
                log::debug!("pan {pointer}: failed ({:?})", event.kind);
                out.push(PanEvent::Fail);
                self.reset();
            }
            // A second Down for a pointer we already follow restarts tracking.
            (PanState::Armed { .. }, PointerEventKind::Down)
            | (PanState::Active { .. }, PointerEventKind::Down) => {
                if self.is_active() {
                    out.push(PanEvent::Fail);
                }
                self.reset();
                out.extend(self.on_pointer_event(event));
            }
        }

        out
    }

    pub fn reset(&mut self) {
        self.state = PanState::Idle;
        self.tracker.reset();
    }
}

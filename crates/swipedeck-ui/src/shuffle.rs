//! The deck-wide "shuffle back" flag.
//!
//! Raising the flag opens a shuffle cycle in which every card springs back to
//! the center with a stagger and then reports its reset animation's outcome.
//! The [`ShuffleResetPolicy`] decides which report lowers the flag again.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;
use swipedeck_animation::AnimationEnd;
use swipedeck_core::{MutableState, RuntimeHandle, Subscription};

use crate::config::ShuffleResetPolicy;

struct ShuffleCycle {
    /// Card indices that have not reported yet.
    pending: SmallVec<[usize; 8]>,
}

struct ShuffleInner {
    flag: MutableState<bool>,
    policy: ShuffleResetPolicy,
    participants: usize,
    cycle: RefCell<Option<ShuffleCycle>>,
    cycles_started: Cell<u64>,
}

/// Shared handle to the shuffle flag. Clones observe and write the same flag.
#[derive(Clone)]
pub struct ShuffleSignal {
    inner: Rc<ShuffleInner>,
}

impl ShuffleSignal {
    pub fn new(runtime: RuntimeHandle, participants: usize, policy: ShuffleResetPolicy) -> Self {
        Self {
            inner: Rc::new(ShuffleInner {
                flag: MutableState::with_runtime(false, runtime),
                policy,
                participants,
                cycle: RefCell::new(None),
                cycles_started: Cell::new(0),
            }),
        }
    }

    pub fn is_raised(&self) -> bool {
        self.inner.flag.get()
    }

    pub fn policy(&self) -> ShuffleResetPolicy {
        self.inner.policy
    }

    /// Number of shuffle cycles opened so far.
    pub fn cycles_started(&self) -> u64 {
        self.inner.cycles_started.get()
    }

    /// Card indices still owing a report in the open cycle.
    pub fn pending_participants(&self) -> Vec<usize> {
        self.inner
            .cycle
            .borrow()
            .as_ref()
            .map(|cycle| cycle.pending.to_vec())
            .unwrap_or_default()
    }

    /// Raise the flag and open a cycle. Returns `false` if one is already in
    /// flight.
    pub fn raise(&self) -> bool {
        if self.is_raised() {
            log::debug!("shuffle already in flight; raise ignored");
            return false;
        }
        *self.inner.cycle.borrow_mut() = Some(ShuffleCycle {
            pending: (0..self.inner.participants).collect(),
        });
        self.inner
            .cycles_started
            .set(self.inner.cycles_started.get() + 1);
        log::debug!(
            "shuffle cycle {} raised for {} cards",
            self.inner.cycles_started.get(),
            self.inner.participants
        );
        self.inner.flag.set(true)
    }

    /// A card's reset animation ended. Lowers the flag when the policy says
    /// this report is the one that closes the cycle.
    pub fn report_reset(&self, index: usize, end: AnimationEnd) {
        match self.inner.policy {
            ShuffleResetPolicy::EveryCompletion => {
                self.inner.cycle.borrow_mut().take();
                if self.inner.flag.set(false) {
                    log::debug!("shuffle reset by card {index} ({end:?})");
                }
            }
            ShuffleResetPolicy::LastParticipant => {
                let closed = {
                    let mut cycle = self.inner.cycle.borrow_mut();
                    let Some(open) = cycle.as_mut() else {
                        log::trace!("card {index} reported outside a shuffle cycle");
                        return;
                    };
                    open.pending.retain(|pending| *pending != index);
                    if open.pending.is_empty() {
                        cycle.take();
                        true
                    } else {
                        false
                    }
                };
                if closed {
                    log::debug!("shuffle reset by last participant {index} ({end:?})");
                    self.inner.flag.set(false);
                }
            }
        }
    }

    /// Observe flag changes as `(previous, current)`.
    pub fn subscribe(&self, observer: impl Fn(bool, bool) + 'static) -> Subscription {
        self.inner
            .flag
            .subscribe(move |previous, current| observer(*previous, *current))
    }
}

impl fmt::Debug for ShuffleSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShuffleSignal")
            .field("raised", &self.is_raised())
            .field("policy", &self.inner.policy)
            .field("pending", &self.pending_participants())
            .finish()
    }
}

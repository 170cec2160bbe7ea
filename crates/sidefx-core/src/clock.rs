use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;
use web_time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone)]
pub struct ManualClock {
    t: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            t: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}

thread_local! {
    static CLOCK: RefCell<Option<Box<dyn Clock>>> = const { RefCell::new(None) };
}

pub fn set_clock(clock: Box<dyn Clock>) {
    CLOCK.with(|c| *c.borrow_mut() = Some(clock));
}

pub fn ensure_system_clock() {
    CLOCK.with(|c| {
        let mut c = c.borrow_mut();
        if c.is_none() {
            *c = Some(Box::new(SystemClock));
        }
    });
}

pub fn now() -> Instant {
    CLOCK.with(|c| {
        c.borrow()
            .as_ref()
            .map(|c| c.now())
            .unwrap_or_else(Instant::now)
    })
}

/// Suspends the calling task for `duration` of clock time, counted from this
/// call.
///
/// The returned future resolves once the executor sees the clock at or past
/// the deadline.
pub fn delay(duration: Duration) -> impl Future<Output = ()> + 'static {
    let deadline = now() + duration;
    let (tx, rx) = oneshot::channel();
    TIMERS.with(|timers| {
        let mut timers = timers.borrow_mut();
        let seq = timers.next_seq;
        timers.next_seq += 1;
        timers.pending.insert((deadline, seq), tx);
    });
    async move {
        // a dropped sender only happens on thread teardown
        let _ = rx.await;
    }
}

#[derive(Default)]
struct Timers {
    pending: BTreeMap<(Instant, u64), oneshot::Sender<()>>,
    next_seq: u64,
}

thread_local! {
    static TIMERS: RefCell<Timers> = RefCell::new(Timers::default());
}

/// Wakes every delay whose deadline has passed. Returns how many were still
/// awaited.
pub(crate) fn fire_due_timers() -> usize {
    let now = now();
    let due = TIMERS.with(|timers| {
        let mut timers = timers.borrow_mut();
        let later = timers.pending.split_off(&(now, u64::MAX));
        std::mem::replace(&mut timers.pending, later)
    });
    due.into_values()
        .map(|tx| tx.send(()))
        .filter(Result::is_ok)
        .count()
}

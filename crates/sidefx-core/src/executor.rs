//! Single-threaded executor for effect tasks.
//!
//! Tasks are `!Send` futures spawned on a thread-local `LocalPool`. Each one
//! is wrapped in `Abortable`: cancelling a task aborts it, its future is never
//! polled again, and the pool drops it on its next pass.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::{AbortHandle, Abortable};
use futures::task::LocalSpawnExt;

struct Executor {
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
    live: RefCell<Vec<TaskHandle>>,
    completed: Cell<usize>,
}

impl Executor {
    fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            pool: RefCell::new(pool),
            spawner,
            live: RefCell::new(Vec::new()),
            completed: Cell::new(0),
        }
    }
}

thread_local! {
    static EXECUTOR: Executor = Executor::new();
}

#[derive(Clone, Debug)]
pub struct TaskHandle {
    label: &'static str,
    abort: AbortHandle,
    finished: Rc<Cell<bool>>,
}

impl TaskHandle {
    /// Cancels the task. Returns `false` if it had already finished or been
    /// cancelled.
    pub fn cancel(&self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.abort.abort();
        log::debug!("cancelled task '{}'", self.label);
        true
    }

    /// True once the task ran to completion or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.finished.get() || self.abort.is_aborted()
    }
}

pub fn spawn(label: &'static str, future: impl Future<Output = ()> + 'static) -> TaskHandle {
    let (abort, registration) = AbortHandle::new_pair();
    let handle = TaskHandle {
        label,
        abort,
        finished: Rc::new(Cell::new(false)),
    };

    let task = Abortable::new(future, registration);
    let finished = handle.finished.clone();
    EXECUTOR.with(|e| {
        let spawned = e.spawner.spawn_local(async move {
            if task.await.is_ok() {
                finished.set(true);
                EXECUTOR.with(|e| e.completed.set(e.completed.get() + 1));
                log::debug!("task '{label}' completed");
            }
        });
        match spawned {
            Ok(()) => {
                log::debug!("spawned task '{label}'");
                e.live.borrow_mut().push(handle.clone());
            }
            Err(err) => {
                log::warn!("could not spawn task '{label}': {err}");
                handle.abort.abort();
            }
        }
    });
    handle
}

/// Number of tasks that have neither completed nor been cancelled.
pub fn pending_tasks() -> usize {
    EXECUTOR.with(|e| {
        let mut live = e.live.borrow_mut();
        live.retain(|t| !t.is_finished());
        live.len()
    })
}

/// Runs every task that can make progress, firing clock timers that are due,
/// until nothing is left to do. Returns how many tasks completed.
pub fn run_until_stalled() -> usize {
    let before = EXECUTOR.with(|e| e.completed.get());
    loop {
        let ran = EXECUTOR.with(|e| match e.pool.try_borrow_mut() {
            Ok(mut pool) => {
                pool.run_until_stalled();
                true
            }
            Err(_) => {
                log::warn!("run_until_stalled called from inside a task; ignored");
                false
            }
        });
        if !ran || crate::clock::fire_due_timers() == 0 {
            break;
        }
    }
    EXECUTOR.with(|e| e.completed.get()) - before
}

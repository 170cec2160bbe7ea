use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use crate::{
    Dispose, RuntimeError, TaskHandle, current_scope, on_unmount, remember, remember_with_key,
    scoped_effect, spawn,
};

struct DisposableEffectState<K> {
    key: Option<K>,
    cleanup: Option<Dispose>,
    installed: bool,
}

/// cleanup on key change or unmount
pub fn disposable_effect_internal<K: PartialEq + Clone + 'static>(
    callsite: &'static str,
    key: K,
    effect: impl FnOnce() -> Dispose,
) {
    let state = remember_with_key(format!("disposable:{callsite}"), || {
        RefCell::new(DisposableEffectState::<K> {
            key: None,
            cleanup: None,
            installed: false,
        })
    });

    // Install a single unmount disposer for this callsite.
    if !std::mem::replace(&mut state.borrow_mut().installed, true) {
        let state = state.clone();
        scoped_effect(move || {
            on_unmount(move || {
                let cleanup = state.borrow_mut().cleanup.take();
                if let Some(d) = cleanup {
                    d.run();
                }
            })
        });
    }

    let changed = state.borrow().key.as_ref() != Some(&key);
    if !changed {
        return;
    }

    // Key change: cleanup previous, then run new effect
    let previous = {
        let mut st = state.borrow_mut();
        st.key = Some(key);
        st.cleanup.take()
    };
    if let Some(d) = previous {
        d.run();
    }
    let d = effect();
    state.borrow_mut().cleanup = Some(d);
}

#[macro_export]
macro_rules! disposable_effect {
    ($key:expr, $effect:expr) => {
        $crate::effects_ext::disposable_effect_internal(
            concat!(module_path!(), ":", line!(), ":", column!()),
            $key,
            $effect,
        )
    };
}

/// Handed to a launched effect body. Goes inactive as soon as the effect is
/// superseded by a key change or its group unmounts.
#[derive(Clone)]
pub struct EffectScope {
    generation: u64,
    current: Rc<Cell<u64>>,
}

impl EffectScope {
    pub fn is_active(&self) -> bool {
        self.current.get() == self.generation
    }
}

struct LaunchedEffectState<K> {
    key: Option<K>,
    task: Option<TaskHandle>,
    generation: Rc<Cell<u64>>,
    installed: bool,
}

impl<K> LaunchedEffectState<K> {
    fn retire(&mut self) {
        self.generation.set(self.generation.get() + 1);
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }
}

/// Internal implementation: keyed by a per-callsite id string.
pub fn launched_effect_internal<K, F, Fut>(callsite: &'static str, key: K, effect: F)
where
    K: PartialEq + Clone + 'static,
    F: FnOnce(EffectScope) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    // One slot per call-site, with K baked into its type.
    let state = remember_with_key(format!("launched:{callsite}"), || {
        RefCell::new(LaunchedEffectState::<K> {
            key: None,
            task: None,
            generation: Rc::new(Cell::new(0)),
            installed: false,
        })
    });

    if !std::mem::replace(&mut state.borrow_mut().installed, true) {
        let state = state.clone();
        scoped_effect(move || on_unmount(move || state.borrow_mut().retire()));
    }

    let scope = {
        let mut st = state.borrow_mut();
        if st.key.as_ref() == Some(&key) {
            return;
        }
        st.retire();
        st.key = Some(key);
        EffectScope {
            generation: st.generation.get(),
            current: st.generation.clone(),
        }
    };

    let task = spawn(callsite, effect(scope));
    state.borrow_mut().task = Some(task);
}

#[macro_export]
macro_rules! launched_effect {
    ($key:expr, $effect:expr) => {
        $crate::effects_ext::launched_effect_internal(
            concat!(module_path!(), ":", line!(), ":", column!()),
            $key,
            $effect,
        )
    };
}

/// Launcher for event-driven work, bound to the lifetime of the group that
/// remembered it.
#[derive(Clone, Default)]
pub struct TaskScope {
    inner: Rc<TaskScopeInner>,
}

#[derive(Default)]
struct TaskScopeInner {
    tasks: RefCell<Vec<TaskHandle>>,
    disposed: Cell<bool>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn launch(
        &self,
        future: impl Future<Output = ()> + 'static,
    ) -> Result<TaskHandle, RuntimeError> {
        if self.inner.disposed.get() {
            return Err(RuntimeError::ScopeDisposed);
        }
        let handle = spawn("task_scope", future);
        let mut tasks = self.inner.tasks.borrow_mut();
        tasks.retain(|t| !t.is_finished());
        tasks.push(handle.clone());
        Ok(handle)
    }

    pub fn active_tasks(&self) -> usize {
        self.inner
            .tasks
            .borrow()
            .iter()
            .filter(|t| !t.is_finished())
            .count()
    }

    pub fn cancel_all(&self) {
        let tasks = std::mem::take(&mut *self.inner.tasks.borrow_mut());
        let cancelled = tasks.iter().filter(|t| t.cancel()).count();
        if cancelled > 0 {
            log::debug!("task scope cancelled {cancelled} task(s)");
        }
    }

    pub fn dispose(&self) {
        self.inner.disposed.set(true);
        self.cancel_all();
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }
}

/// A `TaskScope` that is disposed, and its tasks cancelled, when the current
/// group unmounts.
pub fn remember_task_scope() -> TaskScope {
    let scope = remember(|| {
        let tasks = TaskScope::new();
        match current_scope() {
            Some(owner) => {
                let tasks = tasks.clone();
                owner.add_disposer(move || tasks.dispose());
            }
            None => log::warn!("remember_task_scope outside of a composition group"),
        }
        tasks
    });
    (*scope).clone()
}

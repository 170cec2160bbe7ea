use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::panic::Location;
use std::rc::Rc;

use crate::scope::Scope;
use crate::{Callback, RuntimeError, Scene, View, ViewId};

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
    static RECOMPOSE_REQUESTED: Cell<bool> = const { Cell::new(false) };
}

/// Slot storage of one composition group.
pub struct Group {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
    pub scope: Scope,
}

impl Group {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            cursor: 0,
            keyed_slots: HashMap::new(),
            scope: Scope::new(),
        }
    }
}

#[derive(Default)]
pub struct Composer {
    /// Groups by path. A path segment is the group key plus its call site,
    /// and `#n` for the n-th repeat under the same parent.
    pub groups: HashMap<String, Group>,
    stack: Vec<String>,
    composed: HashSet<String>,
    occurrences: HashMap<String, usize>,
}

impl Composer {
    fn current_mut(&mut self) -> &mut Group {
        let path = self.stack.last().cloned().unwrap_or_default();
        self.groups.entry(path).or_insert_with(Group::new)
    }

    /// Removes every group not composed in the last pass, deepest first.
    fn take_uncomposed(&mut self) -> Vec<(String, Group)> {
        let stale: Vec<String> = self
            .groups
            .keys()
            .filter(|path| !self.composed.contains(*path))
            .cloned()
            .collect();
        let mut out: Vec<(String, Group)> = stale
            .into_iter()
            .filter_map(|path| self.groups.remove(&path).map(|g| (path, g)))
            .collect();
        out.sort_by_key(|(path, _)| std::cmp::Reverse(path.matches('/').count()));
        out
    }

    fn take_all(&mut self) -> Vec<(String, Group)> {
        self.composed.clear();
        self.take_uncomposed()
    }
}

/// Asks the recomposer for another pass. Called on every signal write.
pub fn request_recompose() {
    RECOMPOSE_REQUESTED.with(|r| r.set(true));
}

pub fn take_recompose_request() -> bool {
    RECOMPOSE_REQUESTED.with(|r| r.replace(false))
}

/// Runs `f` as the keyed child group `key` of the current group.
///
/// Groups are told apart by key and call site; repeated calls from the same
/// call site in one pass get one group each, in call order. A group mounts the
/// first pass it is composed in and unmounts at the end of the first pass it
/// is not.
///
/// Mark a component function `#[track_caller]` to have its own callers count
/// as the call site.
#[track_caller]
pub fn group<R>(key: impl AsRef<str>, f: impl FnOnce() -> R) -> R {
    struct Pop;
    impl Drop for Pop {
        fn drop(&mut self) {
            COMPOSER.with(|c| {
                c.borrow_mut().stack.pop();
            });
        }
    }

    let caller = Location::caller();
    let scope = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let parent = c.stack.last().cloned().unwrap_or_default();
        let site = format!(
            "{parent}/{}:{}:{}",
            key.as_ref(),
            caller.line(),
            caller.column()
        );
        let seen = c.occurrences.entry(site.clone()).or_insert(0);
        let path = match *seen {
            0 => site,
            n => format!("{site}#{n}"),
        };
        *seen += 1;
        c.composed.insert(path.clone());
        let g = c.groups.entry(path.clone()).or_insert_with(|| {
            log::debug!("mount {path}");
            Group::new()
        });
        g.cursor = 0;
        let scope = g.scope.clone();
        c.stack.push(path);
        scope
    });
    let _pop = Pop;
    scope.run(f)
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let existing = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let g = c.current_mut();
        let cursor = g.cursor;
        g.cursor += 1;

        if cursor >= g.slots.len() {
            return (cursor, None);
        }
        match g.slots[cursor].downcast_ref::<Rc<T>>() {
            Some(rc) => (cursor, Some(rc.clone())),
            None => {
                log::warn!(
                    "remember: slot {cursor} type changed; replacing. \
                     If this is due to conditional composition, prefer remember_with_key."
                );
                (cursor, None)
            }
        }
    });

    match existing {
        (_, Some(rc)) => rc,
        (cursor, None) => {
            // init may itself touch the runtime; run it unborrowed
            let rc: Rc<T> = Rc::new(init());
            COMPOSER.with(|c| {
                let mut c = c.borrow_mut();
                let g = c.current_mut();
                if cursor < g.slots.len() {
                    g.slots[cursor] = Box::new(rc.clone());
                } else {
                    g.slots.push(Box::new(rc.clone()));
                }
            });
            rc
        }
    }
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    let existing = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let g = c.current_mut();
        let existing = g.keyed_slots.get(&key)?;
        match existing.downcast_ref::<Rc<T>>() {
            Some(rc) => Some(rc.clone()),
            None => {
                log::warn!(
                    "remember_with_key: key '{}' reused with a different type; replacing.",
                    key
                );
                None
            }
        }
    });
    if let Some(rc) = existing {
        return rc;
    }

    let rc: Rc<T> = Rc::new(init());
    COMPOSER.with(|c| {
        c.borrow_mut()
            .current_mut()
            .keyed_slots
            .insert(key, Box::new(rc.clone()));
    });
    rc
}

/// Output of one composition pass: painted scene and clickable regions.
pub struct Frame {
    pub scene: Scene,
    pub hit_regions: Vec<HitRegion>,
}

#[derive(Clone)]
pub struct HitRegion {
    pub id: ViewId,
    pub label: String,
    pub enabled: bool,
    pub on_click: Option<Callback>,
}

impl Frame {
    /// Click handler of the first enabled region labelled `label`.
    pub fn click_handler(&self, label: &str) -> Option<Callback> {
        self.hit_regions
            .iter()
            .find(|h| h.enabled && h.label == label)
            .and_then(|h| h.on_click.clone())
    }
}

/// Drives composition passes and unmounts groups that drop out of them.
///
/// Runtime state is thread-local; use one recomposer per thread.
pub struct Recomposer {
    disposed: bool,
}

impl Default for Recomposer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recomposer {
    pub fn new() -> Self {
        crate::clock::ensure_system_clock();
        Self { disposed: false }
    }

    /// Runs one composition pass of `root`, then unmounts every group the
    /// pass did not reach.
    pub fn compose(&mut self, root: impl FnOnce() -> View) -> Result<View, RuntimeError> {
        if self.disposed {
            return Err(RuntimeError::Disposed);
        }
        COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            c.composed.clear();
            c.occurrences.clear();
            c.stack.clear();
        });

        let view = group("root", root);

        let stale = COMPOSER.with(|c| c.borrow_mut().take_uncomposed());
        dispose_groups(stale);
        Ok(view)
    }

    pub fn repose(
        &mut self,
        build_root: impl FnOnce() -> View,
        layout_paint: impl Fn(&View) -> (Scene, Vec<HitRegion>),
    ) -> Result<Frame, RuntimeError> {
        let root = self.compose(build_root)?;
        let (scene, hit_regions) = layout_paint(&root);
        Ok(Frame { scene, hit_regions })
    }

    /// Unmounts everything. Further passes fail with `RuntimeError::Disposed`.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        let all = COMPOSER.with(|c| c.borrow_mut().take_all());
        dispose_groups(all);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for Recomposer {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn dispose_groups(groups: Vec<(String, Group)>) {
    for (path, g) in groups {
        log::debug!("unmount {path}");
        g.scope.dispose();
        // slots dropped outside the composer borrow
        drop(g);
    }
}

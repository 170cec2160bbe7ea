//! # Composition, Scopes, and Effects
//!
//! Sidefx is a small declarative runtime built around three lifecycle-bound
//! side-effect primitives. The pieces:
//!
//! - `group`: a keyed composition unit (a component instance) with its own
//!   remembered slots and its own `Scope`.
//! - `remember*`: storage bound to the current group.
//! - `Signal<T>`: observable value; writes request another composition pass.
//! - `launched_effect!`, `remember_task_scope`, `disposable_effect!`: the
//!   effects, all cleaned up when the owning group leaves composition.
//!
//! ## Groups and unmount
//!
//! Every `Recomposer::compose` pass records which groups were composed. A
//! group that was composed last pass but not in this one is unmounted: its
//! scope is disposed (children before parents) and its slots are dropped.
//!
//! ```rust
//! use sidefx_core::*;
//!
//! let mut rc = Recomposer::new();
//! let show = signal(true);
//! let root = {
//!     let show = show.clone();
//!     move || {
//!         if show.get() {
//!             group("child", || {
//!                 scoped_effect(|| on_unmount(|| log::info!("child unmounted")));
//!             });
//!         }
//!         View::new(0, ViewKind::Column)
//!     }
//! };
//! rc.compose(&root).unwrap();
//! show.set(false);
//! rc.compose(&root).unwrap(); // "child unmounted"
//! ```
//!
//! ## Effects
//!
//! ```rust
//! use sidefx_core::*;
//! use web_time::Duration;
//!
//! fn Loader(id: u32) -> View {
//!     group("Loader", || {
//!         let text = remember(|| signal(String::new()));
//!         launched_effect!(id, {
//!             let text = (*text).clone();
//!             move |scope: EffectScope| async move {
//!                 text.set(format!("loading {id}"));
//!                 delay(Duration::from_millis(500)).await;
//!                 if scope.is_active() {
//!                     text.set(format!("loaded {id}"));
//!                 }
//!             }
//!         });
//!         View::new(0, ViewKind::Text { text: text.get(), style: TextStyle::Body })
//!     })
//! }
//! ```
//!
//! - `launched_effect!` starts an async task when its key changes and
//!   cancels the previous one; the task is also cancelled on unmount.
//! - `remember_task_scope` hands out a `TaskScope` for event handlers; all of
//!   its tasks are cancelled when the group unmounts.
//! - `disposable_effect!` runs setup now and its `Dispose` before the next
//!   setup or on unmount.
//!
//! Everything is single-threaded: tasks are polled by the thread-local
//! executor (`run_until_stalled`) between composition passes, and time comes
//! from the installed `Clock`.

pub mod clock;
pub mod effects;
pub mod effects_ext;
pub mod error;
pub mod executor;
pub mod locals;
pub mod runtime;
pub mod scope;
pub mod signal;
pub mod view;

pub use clock::*;
pub use effects::*;
pub use effects_ext::*;
pub use error::*;
pub use executor::*;
pub use locals::*;
pub use runtime::*;
pub use scope::*;
pub use signal::*;
pub use view::*;

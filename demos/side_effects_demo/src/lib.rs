#![allow(non_snake_case)]
//! The side-effects demo: one screen, three components, each showing one
//! lifecycle-bound effect primitive of `sidefx-core`.
//!
//! - [`KeyedAsyncLoader`] restarts a simulated fetch whenever its user id
//!   changes (`launched_effect!`).
//! - [`ScopedTaskLauncher`] runs a button-triggered task in a scope tied to
//!   the component (`remember_task_scope`).
//! - [`ToggleableResource`] registers and unregisters a logical listener
//!   around its key (`disposable_effect!`).
//!
//! [`DemoRunner`] drives the screen headlessly: clicks, time, frames.

pub mod app;
pub mod components;
pub mod config;
pub mod journal;
pub mod runner;

pub use app::{AppState, SideEffectsDemoApp};
pub use components::{KeyedAsyncLoader, ScopedTaskLauncher, ToggleableResource};
pub use config::{ConfigError, DemoConfig};
pub use journal::{Journal, JournalEntry, JournalEvent};
pub use runner::DemoRunner;

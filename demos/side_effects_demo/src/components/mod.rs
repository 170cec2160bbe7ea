mod display;
mod launcher;
mod listener;
mod loader;

pub use display::DisplayState;
pub use launcher::{LAUNCHER, ScopedTaskLauncher, START_TASK};
pub use listener::{LISTENER, ToggleableResource};
pub use loader::{KeyedAsyncLoader, LOADER};

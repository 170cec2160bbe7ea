use sidefx_core::{Dispose, View, disposable_effect, group, on_unmount};
use sidefx_ui::Text;

use super::DisplayState;
use crate::journal::JournalEvent;

pub const LISTENER: &str = "ToggleableResource";

/// Holds a logical listener while `active` is true. The listener is
/// unregistered before any re-registration and once on unmount.
#[track_caller]
pub fn ToggleableResource(active: bool) -> View {
    group(LISTENER, || {
        let state = DisplayState::remember(LISTENER, "Listener idle");

        disposable_effect!(active, {
            let state = state.clone();
            move || listen(state, active)
        });

        Text(state.status())
    })
}

fn listen(state: DisplayState, active: bool) -> Dispose {
    if !active {
        state.set_status("Listener inactive");
        return on_unmount(|| {});
    }

    log::info!("{LISTENER}: listener registered");
    state.record(JournalEvent::Register);
    state.set_status("Listener registered");

    on_unmount(move || {
        log::info!("{LISTENER}: listener unregistered");
        state.record(JournalEvent::Unregister);
        state.set_status("Listener unregistered");
    })
}

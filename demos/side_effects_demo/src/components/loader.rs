use sidefx_core::{EffectScope, View, delay, group, launched_effect, local_or_default};
use sidefx_ui::{Column, LinearProgressIndicator, Text, ViewExt};

use super::DisplayState;
use crate::config::DemoConfig;

pub const LOADER: &str = "KeyedAsyncLoader";

/// Shows the data of `user_id`, refetching (after a simulated delay) whenever
/// the id changes. A fetch still waiting when the id changes is cancelled, so
/// it can never overwrite the text of a newer id.
#[track_caller]
pub fn KeyedAsyncLoader(user_id: u32) -> View {
    group(LOADER, || {
        let state = DisplayState::remember(LOADER, "Waiting for a user id");
        let fetch_delay = local_or_default::<DemoConfig>().fetch_delay;

        launched_effect!(user_id, {
            let state = state.clone();
            move |scope: EffectScope| {
                let fetched = delay(fetch_delay);
                async move {
                    state.set_busy(true);
                    state.set_status(format!("Loading data for user {user_id}..."));
                    fetched.await;
                    if !scope.is_active() {
                        return;
                    }
                    state.set_busy(false);
                    state.set_status(format!("Data loaded for user {user_id}"));
                }
            }
        });

        Column().child((
            Text(state.status()),
            state.is_busy().then(LinearProgressIndicator),
        ))
    })
}

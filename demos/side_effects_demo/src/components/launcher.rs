use sidefx_core::{TaskScope, View, delay, group, local_or_default, remember_task_scope};
use sidefx_ui::{Button, ButtonExt, Column, LinearProgressIndicator, Text, ViewExt};
use web_time::Duration;

use super::DisplayState;
use crate::config::DemoConfig;

pub const LAUNCHER: &str = "ScopedTaskLauncher";
pub const START_TASK: &str = "Start Task";

/// A button that runs one simulated task at a time. The task lives in a scope
/// owned by this component and is cancelled if the component goes away.
#[track_caller]
pub fn ScopedTaskLauncher() -> View {
    group(LAUNCHER, || {
        let state = DisplayState::remember(LAUNCHER, "Press the button to start a task");
        let tasks = remember_task_scope();
        let duration = local_or_default::<DemoConfig>().task_duration;
        let busy = state.is_busy();

        let on_click = {
            let state = state.clone();
            move || start_task(&state, &tasks, duration)
        };

        Column().child((
            Text(state.status()),
            busy.then(LinearProgressIndicator),
            Button(START_TASK, on_click).enabled(!busy),
        ))
    })
}

fn start_task(state: &DisplayState, tasks: &TaskScope, duration: Duration) {
    if state.is_busy() {
        log::debug!("{LAUNCHER}: task already running; ignoring click");
        return;
    }

    let task_state = state.clone();
    let finished = delay(duration);
    let launched = tasks.launch(async move {
        finished.await;
        task_state.set_busy(false);
        task_state.set_status("Task completed!");
        log::info!("{LAUNCHER}: task finished");
    });

    match launched {
        Ok(_) => {
            log::info!("{LAUNCHER}: task started");
            state.set_busy(true);
            state.set_status("Task running...");
        }
        // the component has left composition; its state must not change
        Err(err) => log::warn!("{LAUNCHER}: {err}"),
    }
}

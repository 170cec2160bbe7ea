use sidefx_core::{Signal, TextStyle, View, local_or_default, remember, signal};
use sidefx_ui::{Button, Card, Column, Divider, Row, Surface, Text, TextExt, ViewExt};

use crate::components::{KeyedAsyncLoader, ScopedTaskLauncher, ToggleableResource};
use crate::config::DemoConfig;

/// Keys and visibility flags owned by the demo screen.
#[derive(Clone, Debug)]
pub struct AppState {
    pub user_id: Signal<u32>,
    pub listener_active: Signal<bool>,
    pub show_loader: Signal<bool>,
    pub show_launcher: Signal<bool>,
    pub show_listener: Signal<bool>,
}

impl AppState {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            user_id: signal(config.initial_user_id),
            listener_active: signal(config.listener_initially_active),
            show_loader: signal(true),
            show_launcher: signal(true),
            show_listener: signal(true),
        }
    }
}

pub fn SideEffectsDemoApp() -> View {
    let app = remember(|| AppState::new(&local_or_default::<DemoConfig>()));

    Surface(Column().child((
        Text("Side Effects Demo").text_style(TextStyle::Headline),
        Divider(),
        Card().child((
            LoaderSection(&app),
            Divider(),
            LauncherSection(&app),
            Divider(),
            ListenerSection(&app),
        )),
    )))
}

fn LoaderSection(app: &AppState) -> View {
    let set_user = |id: u32| {
        let user_id = app.user_id.clone();
        move || user_id.set(id)
    };

    Column().child((
        Text("1. launched_effect (restart on key change)").text_style(TextStyle::Title),
        app.show_loader
            .get()
            .then(|| KeyedAsyncLoader(app.user_id.get())),
        Row().child((
            Button("Load User 202", set_user(202)),
            Button("Load User 303", set_user(303)),
            visibility_toggle(&app.show_loader, "Loader"),
        )),
    ))
}

fn LauncherSection(app: &AppState) -> View {
    Column().child((
        Text("2. remember_task_scope (user events)").text_style(TextStyle::Title),
        app.show_launcher.get().then(ScopedTaskLauncher),
        visibility_toggle(&app.show_launcher, "Task Launcher"),
    ))
}

fn ListenerSection(app: &AppState) -> View {
    let active = app.listener_active.get();
    let label = if active {
        "Deactivate Listener (Key Change)"
    } else {
        "Activate Listener"
    };

    Column().child((
        Text("3. disposable_effect (cleanup)").text_style(TextStyle::Title),
        app.show_listener
            .get()
            .then(|| ToggleableResource(active)),
        Row().child((
            Button(label, {
                let flag = app.listener_active.clone();
                move || flag.update(|v| *v = !*v)
            }),
            visibility_toggle(&app.show_listener, "Listener"),
        )),
    ))
}

/// "Hide {what}" / "Show {what}": removing a component from composition
/// unmounts it.
fn visibility_toggle(shown: &Signal<bool>, what: &str) -> View {
    let label = if shown.get() {
        format!("Hide {what}")
    } else {
        format!("Show {what}")
    };
    let shown = shown.clone();
    Button(label, move || shown.update(|v| *v = !*v))
}

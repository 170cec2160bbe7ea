use side_effects_demo::components::{LAUNCHER, LISTENER, LOADER, START_TASK};
use side_effects_demo::{
    DemoConfig, DemoRunner, JournalEvent, KeyedAsyncLoader, ScopedTaskLauncher,
};
use sidefx_ui::{Column, ViewExt};
use sidefx_core::{ManualClock, RuntimeError, pending_tasks, set_clock, signal};
use web_time::Duration;

fn manual_clock() -> ManualClock {
    let clock = ManualClock::new();
    set_clock(Box::new(clock.clone()));
    clock
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn listener_transitions(runner: &DemoRunner) -> Vec<JournalEvent> {
    runner
        .journal()
        .for_component(LISTENER)
        .into_iter()
        .filter(|e| matches!(e, JournalEvent::Register | JournalEvent::Unregister))
        .collect()
}

fn busy_starts(runner: &DemoRunner) -> usize {
    runner
        .journal()
        .for_component(LAUNCHER)
        .iter()
        .filter(|e| **e == JournalEvent::Busy(true))
        .count()
}

#[test]
fn rapid_user_changes_only_load_the_last_user() {
    let clock = manual_clock();
    let mut runner = DemoRunner::with_app(DemoConfig::default());

    runner.pump().unwrap();
    assert!(runner.contains("Loading data for user 101..."));

    assert!(runner.click("Load User 202").unwrap());
    assert!(runner.click("Load User 303").unwrap());
    assert!(runner.contains("Loading data for user 303..."));

    clock.advance(ms(2500));
    runner.pump().unwrap();
    assert!(runner.contains("Data loaded for user 303"));

    let loaded: Vec<String> = runner
        .journal()
        .statuses(LOADER)
        .into_iter()
        .filter(|s| s.starts_with("Data loaded"))
        .collect();
    assert_eq!(loaded, vec!["Data loaded for user 303"]);
}

#[test]
fn final_text_tracks_the_last_identifier_for_any_sequence() {
    let sequences: &[&[(u32, u64)]] = &[
        &[(5, 0), (9, 500), (5, 1999), (42, 100)],
        &[(1, 0), (2, 0), (3, 0)],
        // the first fetch completes before the change; still ends on 8
        &[(7, 2100), (8, 10)],
        &[(4, 1000), (4, 1000), (6, 0)],
    ];

    for seq in sequences {
        let clock = manual_clock();
        let key = signal(seq[0].0);
        let mut runner = DemoRunner::new(DemoConfig::default(), {
            let key = key.clone();
            move || KeyedAsyncLoader(key.get())
        });
        runner.pump().unwrap();

        for &(id, wait) in seq.iter() {
            key.set(id);
            runner.pump().unwrap();
            clock.advance(ms(wait));
            runner.pump().unwrap();
        }
        clock.advance(ms(2000));
        runner.pump().unwrap();

        let last = seq.last().unwrap().0;
        assert_eq!(runner.text(), format!("Data loaded for user {last}"));
        let statuses = runner.journal().statuses(LOADER);
        assert_eq!(
            statuses.last().unwrap(),
            &format!("Data loaded for user {last}")
        );
        runner.shutdown();
    }
}

#[test]
fn sibling_loaders_keep_separate_state() {
    let clock = manual_clock();
    let mut runner = DemoRunner::new(DemoConfig::default(), || {
        Column().child((KeyedAsyncLoader(1), KeyedAsyncLoader(2)))
    });
    runner.pump().unwrap();
    assert!(runner.contains("Loading data for user 1..."));
    assert!(runner.contains("Loading data for user 2..."));

    clock.advance(ms(2500));
    runner.pump().unwrap();
    assert!(runner.contains("Data loaded for user 1"));
    assert!(runner.contains("Data loaded for user 2"));
    assert_eq!(pending_tasks(), 0);
}

#[test]
fn loaders_built_from_a_list_each_fetch_their_own_user() {
    let clock = manual_clock();
    let ids = signal(vec![7u32, 8, 9]);
    let mut runner = DemoRunner::new(DemoConfig::default(), {
        let ids = ids.clone();
        move || Column().child(ids.get().into_iter().map(KeyedAsyncLoader).collect::<Vec<_>>())
    });
    runner.pump().unwrap();
    assert_eq!(pending_tasks(), 3);

    clock.advance(ms(1000));
    ids.set(vec![7, 10, 9]);
    runner.pump().unwrap();
    clock.advance(ms(1000));
    runner.pump().unwrap();
    assert!(runner.contains("Data loaded for user 7"));
    assert!(runner.contains("Loading data for user 10..."));
    assert!(runner.contains("Data loaded for user 9"));

    clock.advance(ms(1000));
    runner.pump().unwrap();
    assert!(runner.contains("Data loaded for user 10"));
    assert!(!runner.contains("user 8"));
}

#[test]
fn listener_toggle_orders_unregister_before_register() {
    let _clock = manual_clock();
    let mut runner = DemoRunner::with_app(DemoConfig::default());
    runner.pump().unwrap();
    assert!(runner.contains("Listener registered"));

    assert!(runner.click("Deactivate Listener (Key Change)").unwrap());
    assert!(runner.contains("Listener inactive"));
    assert!(runner.click("Activate Listener").unwrap());

    assert_eq!(
        listener_transitions(&runner),
        vec![
            JournalEvent::Register,
            JournalEvent::Unregister,
            JournalEvent::Register,
        ]
    );
}

#[test]
fn listener_unmount_unregisters_exactly_once() {
    let clock = manual_clock();
    let mut runner = DemoRunner::with_app(DemoConfig::default());
    runner.pump().unwrap();

    assert!(runner.click("Hide Listener").unwrap());
    assert!(!runner.contains("Listener registered"));
    let after_unmount = runner.journal().for_component(LISTENER);
    assert_eq!(
        listener_transitions(&runner),
        vec![JournalEvent::Register, JournalEvent::Unregister]
    );

    // unrelated activity, then a full shutdown
    assert!(runner.click("Load User 202").unwrap());
    assert!(runner.click("Deactivate Listener (Key Change)").unwrap());
    clock.advance(ms(5000));
    runner.pump().unwrap();
    runner.shutdown();

    assert_eq!(runner.journal().for_component(LISTENER), after_unmount);
}

#[test]
fn task_launcher_never_overlaps() {
    let clock = manual_clock();
    let mut runner = DemoRunner::new(DemoConfig::default(), ScopedTaskLauncher);
    runner.pump().unwrap();

    let handler = runner.frame().unwrap().click_handler(START_TASK).unwrap();
    handler();
    // the handler itself refuses a second launch while busy
    handler();
    runner.pump().unwrap();

    assert!(runner.contains("Task running..."));
    assert!(runner.contains("[ Start Task ] (disabled)"));
    assert!(!runner.click(START_TASK).unwrap());
    assert_eq!(busy_starts(&runner), 1);
    assert_eq!(pending_tasks(), 1);

    clock.advance(ms(3000));
    runner.pump().unwrap();
    assert!(runner.contains("Task completed!"));
    assert_eq!(pending_tasks(), 0);

    // idle again: a new task may start
    assert!(runner.click(START_TASK).unwrap());
    assert_eq!(busy_starts(&runner), 2);
}

#[test]
fn unmounting_the_launcher_mid_task_stops_all_writes() {
    let clock = manual_clock();
    let mut runner = DemoRunner::with_app(DemoConfig::default());
    runner.pump().unwrap();

    assert!(runner.click(START_TASK).unwrap());
    clock.advance(ms(1000));
    runner.pump().unwrap();

    assert!(runner.click("Hide Task Launcher").unwrap());
    let writes_at_unmount = runner.journal().for_component(LAUNCHER).len();

    clock.advance(ms(5000));
    runner.pump().unwrap();
    assert_eq!(
        runner.journal().for_component(LAUNCHER).len(),
        writes_at_unmount
    );
    assert!(!runner.contains("Task completed!"));
    assert!(runner.click(START_TASK).is_ok_and(|clicked| !clicked));
}

#[test]
fn stale_handler_after_unmount_is_a_no_op() {
    let _clock = manual_clock();
    let mut runner = DemoRunner::with_app(DemoConfig::default());
    runner.pump().unwrap();

    let handler = runner.frame().unwrap().click_handler(START_TASK).unwrap();
    assert!(runner.click("Hide Task Launcher").unwrap());
    let before = runner.journal().for_component(LAUNCHER).len();

    handler();
    runner.pump().unwrap();
    assert_eq!(runner.journal().for_component(LAUNCHER).len(), before);
}

#[test]
fn remounting_starts_fresh_component_state() {
    let clock = manual_clock();
    let mut runner = DemoRunner::with_app(DemoConfig::default());
    runner.pump().unwrap();
    clock.advance(ms(2000));
    runner.pump().unwrap();
    assert!(runner.contains("Data loaded for user 101"));

    assert!(runner.click("Hide Loader").unwrap());
    assert!(!runner.contains("Data loaded for user 101"));
    assert!(runner.click("Show Loader").unwrap());
    assert!(runner.contains("Loading data for user 101..."));
}

#[test]
fn shutdown_disposes_everything() {
    let _clock = manual_clock();
    let mut runner = DemoRunner::with_app(DemoConfig::default());
    runner.pump().unwrap();
    assert!(runner.click(START_TASK).unwrap());

    runner.shutdown();
    assert!(runner.is_shut_down());
    assert_eq!(pending_tasks(), 0);
    assert_eq!(
        listener_transitions(&runner),
        vec![JournalEvent::Register, JournalEvent::Unregister]
    );
    assert!(matches!(runner.pump(), Err(RuntimeError::Disposed)));
}

use side_effects_demo::{DemoConfig, DemoRunner};
use sidefx_core::now;
use web_time::Duration;

/// (milliseconds after start, button label)
const SCRIPT: &[(u64, &str)] = &[
    (500, "Load User 202"),
    (700, "Load User 303"),
    (3000, "Start Task"),
    (3500, "Start Task"),
    (4000, "Deactivate Listener (Key Change)"),
    (4500, "Activate Listener"),
    (7000, "Start Task"),
    (7500, "Hide Task Launcher"),
    (8000, "Hide Listener"),
    (9000, "Show Task Launcher"),
];

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DemoConfig::from_env()?;
    log::info!("starting with {config:?}");
    let tick = config.frame_interval;
    let tail = config.fetch_delay.max(config.task_duration);

    let mut runner = DemoRunner::with_app(config);
    let start = now();
    let mut last = String::new();
    let mut script = SCRIPT.iter().peekable();

    loop {
        let elapsed = now().duration_since(start);

        while let Some((at, label)) = script.next_if(|(at, _)| elapsed >= Duration::from_millis(*at)) {
            log::info!("t={at}ms click '{label}'");
            if !runner.click(label)? {
                log::warn!("'{label}' is not clickable right now");
            }
        }

        runner.pump()?;
        let text = runner.text();
        if text != last {
            println!("--- t={}ms\n{text}\n", elapsed.as_millis());
            last = text;
        }

        let script_end = SCRIPT.last().map(|(at, _)| *at).unwrap_or_default();
        if script.peek().is_none() && elapsed >= Duration::from_millis(script_end) + tail {
            break;
        }
        std::thread::sleep(tick);
    }

    runner.shutdown();
    log::info!("journal: {} entries", runner.journal().len());
    Ok(())
}

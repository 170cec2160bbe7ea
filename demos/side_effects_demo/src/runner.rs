use sidefx_core::{Frame, Recomposer, RuntimeError, View, provide, run_until_stalled};
use sidefx_core::runtime::take_recompose_request;
use sidefx_ui::layout_and_paint;

use crate::app::SideEffectsDemoApp;
use crate::config::DemoConfig;
use crate::journal::Journal;

// Passes after which a still-dirty composition is given up on for this tick.
const MAX_PASSES: usize = 16;

/// Headless host for a composition: runs passes, polls tasks, dispatches
/// clicks and keeps the last painted frame.
pub struct DemoRunner {
    recomposer: Recomposer,
    root: Box<dyn Fn() -> View>,
    config: DemoConfig,
    journal: Journal,
    frame: Option<Frame>,
}

impl DemoRunner {
    pub fn new(config: DemoConfig, root: impl Fn() -> View + 'static) -> Self {
        Self {
            recomposer: Recomposer::new(),
            root: Box::new(root),
            config,
            journal: Journal::new(),
            frame: None,
        }
    }

    /// The full demo screen.
    pub fn with_app(config: DemoConfig) -> Self {
        Self::new(config, SideEffectsDemoApp)
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Composes and polls tasks until neither produces new state writes.
    pub fn pump(&mut self) -> Result<&Frame, RuntimeError> {
        take_recompose_request();
        for pass in 0.. {
            let frame = {
                let root = &self.root;
                let config = self.config.clone();
                let journal = self.journal.clone();
                self.recomposer.repose(
                    || provide(config, || provide(journal, || root())),
                    layout_and_paint,
                )?
            };
            self.frame = Some(frame);
            run_until_stalled();

            if !take_recompose_request() {
                break;
            }
            if pass + 1 >= MAX_PASSES {
                log::warn!("composition still dirty after {MAX_PASSES} passes");
                break;
            }
        }
        self.frame.as_ref().ok_or(RuntimeError::Disposed)
    }

    /// Clicks the first enabled button labelled `label` in the current frame.
    /// Returns `false` if there is none.
    pub fn click(&mut self, label: &str) -> Result<bool, RuntimeError> {
        if self.frame.is_none() {
            self.pump()?;
        }
        let handler = self.frame.as_ref().and_then(|f| f.click_handler(label));
        match handler {
            Some(handler) => {
                log::debug!("click '{label}'");
                handler();
                self.pump()?;
                Ok(true)
            }
            None => {
                log::debug!("no enabled button '{label}'");
                Ok(false)
            }
        }
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Painted text of the last frame.
    pub fn text(&self) -> String {
        self.frame
            .as_ref()
            .map(|f| f.scene.text())
            .unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.frame
            .as_ref()
            .is_some_and(|f| f.scene.contains(needle))
    }

    /// Unmounts the whole screen.
    pub fn shutdown(&mut self) {
        self.recomposer.dispose();
        self.frame = None;
    }

    pub fn is_shut_down(&self) -> bool {
        self.recomposer.is_disposed()
    }
}

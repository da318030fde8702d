use quickstash_core::{Actor, StashConfig, StashReport, StashService};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Answers whether the player is busy with something else (menus, dialogs, text input).
pub trait InteractionGate: Send + Sync {
    fn is_blocked(&self) -> bool;
}

/// Tracks whether any menu is open
#[derive(Debug, Default)]
pub struct MenuState {
    open: AtomicBool,
}

impl MenuState {
    pub fn set_open(&self, open: bool) {
        self.open.store(open, Ordering::Relaxed);
    }
}

impl InteractionGate for MenuState {
    fn is_blocked(&self) -> bool {
        self.open.load(Ordering::Relaxed)
    }
}

struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Turns a key press into at most one stash pass.
pub struct StashTrigger {
    service: Arc<StashService>,
    gate: Arc<dyn InteractionGate>,
    hotkey: String,
    running: AtomicBool,
}

impl StashTrigger {
    pub fn new(service: Arc<StashService>, gate: Arc<dyn InteractionGate>, hotkey: impl Into<String>) -> Self {
        Self {
            service,
            gate,
            hotkey: hotkey.into(),
            running: AtomicBool::new(false),
        }
    }

    pub fn hotkey(&self) -> &str {
        &self.hotkey
    }

    pub fn on_key(&self, key: &str, actor: &mut dyn Actor, config: &StashConfig) -> Option<StashReport> {
        if !key.eq_ignore_ascii_case(&self.hotkey) {
            return None;
        }
        self.fire(actor, config)
    }

    /// Run a pass unless the feature is off, the player is busy, or a pass is already running
    pub fn fire(&self, actor: &mut dyn Actor, config: &StashConfig) -> Option<StashReport> {
        if !config.enabled {
            return None;
        }

        if self.gate.is_blocked() {
            tracing::debug!("stash suppressed, interaction blocked");
            return None;
        }

        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("stash already running, trigger dropped");
            return None;
        }
        let _guard = RunningGuard(&self.running);

        Some(self.service.run_stash_pass(actor, config))
    }
}

/// Container hover text with the stash hint appended
pub fn hover_text(base: &str, hotkey: &str) -> String {
    format!("{base}\n[<color=yellow><b>{hotkey}</b></color>] Quick Stash")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_text_appends_hint() {
        assert_eq!(
            hover_text("Chest\n[E] Open", "G"),
            "Chest\n[E] Open\n[<color=yellow><b>G</b></color>] Quick Stash"
        );
    }

    #[test]
    fn menu_state_blocks() {
        let m = MenuState::default();
        assert!(!m.is_blocked());
        m.set_open(true);
        assert!(m.is_blocked());
    }
}

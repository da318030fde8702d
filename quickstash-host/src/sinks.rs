use parking_lot::Mutex;
use quickstash_core::{ContainerId, HighlightSink, ReportSink};

/// Center-screen messages shown to the player
#[derive(Debug, Default)]
pub struct MessageHud {
    messages: Mutex<Vec<String>>,
}

impl MessageHud {
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }
}

impl ReportSink for MessageHud {
    fn report(&self, message: &str) {
        tracing::info!(%message, "hud message");
        self.messages.lock().push(message.to_string());
    }
}

/// Highlights by writing a log line
#[derive(Debug, Default)]
pub struct LogHighlighter;

impl HighlightSink for LogHighlighter {
    fn set_highlight(&self, id: ContainerId, enabled: bool) {
        if enabled {
            tracing::info!(%id, "container highlighted");
        } else {
            tracing::info!(%id, "container highlight cleared");
        }
    }
}

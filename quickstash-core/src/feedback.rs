use crate::types::ContainerId;

/// Receives the destination of every successfully stashed item.
pub trait FeedbackSink: Send + Sync {
    fn container_received(&self, id: ContainerId);
}

/// User-visible messages, one per item that could not be stashed.
pub trait ReportSink: Send + Sync {
    fn report(&self, message: &str);
}

/// Turns a container's highlight on or off. Rendering is up to the implementor.
pub trait HighlightSink: Send + Sync {
    fn set_highlight(&self, id: ContainerId, enabled: bool);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl FeedbackSink for Discard {
    fn container_received(&self, _id: ContainerId) {}
}

impl ReportSink for Discard {
    fn report(&self, _message: &str) {}
}

impl HighlightSink for Discard {
    fn set_highlight(&self, _id: ContainerId, _enabled: bool) {}
}

use crate::feedback::{FeedbackSink, HighlightSink};
use crate::types::ContainerId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

struct PendingRevert {
    generation: u64,
    task: JoinHandle<()>,
}

type PendingMap = Arc<Mutex<HashMap<ContainerId, PendingRevert>>>;

/// Highlights containers that received items and turns the highlight off again after a delay.
///
/// There is at most one pending revert per container. Highlighting a container that is still
/// lit restarts its timer. Sink calls happen under the internal lock, so a sink must not call
/// back into the scheduler.
pub struct HighlightScheduler {
    sink: Arc<dyn HighlightSink>,
    duration: Duration,
    runtime: Handle,
    pending: PendingMap,
    generation: AtomicU64,
}

impl HighlightScheduler {
    pub fn new(sink: Arc<dyn HighlightSink>, duration: Duration, runtime: Handle) -> Self {
        Self {
            sink,
            duration,
            runtime,
            pending: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    pub fn highlight(&self, id: ContainerId) {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let mut g = self.pending.lock();

        if let Some(prev) = g.remove(&id) {
            prev.task.abort();
            tracing::trace!(%id, "highlight timer restarted");
        } else {
            self.sink.set_highlight(id, true);
        }

        let pending = self.pending.clone();
        let sink = self.sink.clone();
        let duration = self.duration;
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(duration).await;

            let mut g = pending.lock();
            // A newer highlight owns the entry now
            if g.get(&id).is_some_and(|p| p.generation == generation) {
                g.remove(&id);
                sink.set_highlight(id, false);
            }
        });

        g.insert(id, PendingRevert { generation, task });
    }

    /// Number of containers currently waiting for their highlight to be reverted
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_highlighted(&self, id: ContainerId) -> bool {
        self.pending.lock().contains_key(&id)
    }

    /// Revert every pending highlight right away
    pub fn revert_all(&self) {
        let mut g = self.pending.lock();
        for (id, p) in g.drain() {
            p.task.abort();
            self.sink.set_highlight(id, false);
        }
    }
}

impl FeedbackSink for HighlightScheduler {
    fn container_received(&self, id: ContainerId) {
        self.highlight(id);
    }
}

impl Drop for HighlightScheduler {
    fn drop(&mut self) {
        self.revert_all();
    }
}

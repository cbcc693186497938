use oralis_core::models::progress::ProgressEvent;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Receives one event per stage transition, strictly in pipeline order.
/// Implementations observe; they cannot influence the run.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: &ProgressEvent);
}

/// Discards every event.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&self, _event: &ProgressEvent) {}
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn emit(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Forwards events to an unbounded channel, for callers that consume
/// progress on another task.
pub struct ChannelProgress(pub UnboundedSender<ProgressEvent>);

impl ProgressSink for ChannelProgress {
    fn emit(&self, event: &ProgressEvent) {
        if self.0.send(event.clone()).is_err() {
            debug!(stage = %event.stage_name, "progress receiver dropped");
        }
    }
}

use log::{debug, error};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::archive::Backend;
use crate::core::constants::defaults;
use crate::core::error::WaybackUrlsError;
use crate::core::types::Record;

/// What a backend task puts on the merged stream.
#[derive(Debug)]
pub enum BackendEvent {
    /// A capture, in the order its backend produced it
    Record {
        source: &'static str,
        record: Record,
    },
    /// The backend could not reach its archive at all
    Failed {
        source: &'static str,
        error: WaybackUrlsError,
    },
}

/// Merged output of every backend for one domain.
///
/// `next` yields `None` only once every sender is gone and every backend
/// task has been joined, so a finished stream means a finished domain.
pub struct MergedStream {
    receiver: mpsc::Receiver<BackendEvent>,
    tasks: JoinSet<()>,
}

impl MergedStream {
    pub async fn next(&mut self) -> Option<BackendEvent> {
        match self.receiver.recv().await {
            Some(event) => Some(event),
            None => {
                self.join_all().await;
                None
            }
        }
    }

    async fn join_all(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(err) = joined {
                error!("backend task ended abnormally: {err}");
            }
        }
    }
}

/// Start one task per backend for `domain` and merge their output.
///
/// Backends fail independently: an error in one is reported as a
/// `BackendEvent::Failed` and never cancels its siblings.
pub fn fan_out(domain: &str, backends: &[Arc<dyn Backend>]) -> MergedStream {
    let (sender, receiver) = mpsc::channel(defaults::CHANNEL_CAPACITY);
    let mut tasks = JoinSet::new();

    for backend in backends {
        let backend = Arc::clone(backend);
        let sender = sender.clone();
        let domain = domain.to_string();

        tasks.spawn(async move {
            let source = backend.name();
            match backend.fetch(&domain).await {
                Ok(records) => {
                    debug!("{source}: {} record(s) for [{domain}]", records.len());
                    for record in records {
                        if sender
                            .send(BackendEvent::Record { source, record })
                            .await
                            .is_err()
                        {
                            // Consumer is gone, nothing left to deliver to
                            break;
                        }
                    }
                }
                Err(error) => {
                    let _ = sender.send(BackendEvent::Failed { source, error }).await;
                }
            }
        });
    }

    // Only the tasks hold senders now; the channel closes when the last one ends
    drop(sender);

    MergedStream { receiver, tasks }
}

//! Single-use completion signal between the filter, its alert hook, and the host.

use crate::error::PublishError;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

type Outcome = Result<(), PublishError>;

/// Create a connected completion pair.
pub fn channel() -> (Done, Completion) {
    let (tx, rx) = oneshot::channel();
    (Done { tx }, Completion { rx })
}

/// Completion handle given to whoever finishes the run.
///
/// Consumed on use, so a run can only be signalled once. Dropping it without
/// calling any method resolves the paired [`Completion`] to
/// [`PublishError::CompletionDropped`].
#[derive(Debug)]
pub struct Done {
    tx: oneshot::Sender<Outcome>,
}

impl Done {
    /// Signal success.
    pub fn finish(self) {
        self.complete(Ok(()));
    }

    /// Signal failure of the named alert.
    pub fn fail(self, alert: impl Into<String>, message: impl Into<String>) {
        self.complete(Err(PublishError::Alert {
            name: alert.into(),
            message: message.into(),
        }));
    }

    /// Signal an arbitrary outcome.
    pub fn complete(self, outcome: Outcome) {
        // The host may have stopped listening; nothing left to notify then.
        let _ = self.tx.send(outcome);
    }
}

/// Host side of a run's completion.
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<Outcome>,
}

impl Completion {
    /// Wait for the run to be signalled.
    pub async fn wait(self) -> Outcome {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(PublishError::CompletionDropped),
        }
    }

    /// Block the current thread until the run is signalled.
    ///
    /// Must not be called from within an async runtime.
    pub fn wait_blocking(self) -> Outcome {
        match self.rx.blocking_recv() {
            Ok(outcome) => outcome,
            Err(_) => Err(PublishError::CompletionDropped),
        }
    }

    /// Poll without blocking. `None` means the alert hook has not signalled yet.
    pub fn try_result(&mut self) -> Option<Outcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(PublishError::CompletionDropped)),
        }
    }
}

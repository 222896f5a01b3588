//! Turn observer port.
//!
//! The host application sees every message the moment it is appended to the
//! canonical history, in order, before the discussion moves on. Observers
//! can also listen to the moderator's decisions.

use roundtable_domain::{BooleanDecision, Message, SelectionDecision};

/// Callback invoked synchronously by the orchestrator.
///
/// Only `on_message` is required. Everything else defaults to a no-op
/// (`on_messages` fans out to `on_message`).
pub trait TurnObserver: Send + Sync {
    /// A message was appended to the history.
    fn on_message(&self, message: &Message);

    /// Several messages were appended at once.
    fn on_messages(&self, messages: &[Message]) {
        for message in messages {
            self.on_message(message);
        }
    }

    /// The moderator answered "should the discussion end?".
    fn on_termination_decision(&self, _decision: &BooleanDecision) {}

    /// The moderator picked the next speaker.
    fn on_speaker_selected(&self, _decision: &SelectionDecision) {}
}

/// No-op implementation for tests and headless runs.
pub struct NoObserver;

impl TurnObserver for NoObserver {
    fn on_message(&self, _message: &Message) {}
}

/// Adapter turning a plain closure into a [`TurnObserver`].
///
/// ```
/// use roundtable_application::ObserverFn;
///
/// let observer = ObserverFn(|m: &roundtable_domain::Message| println!("{}", m.content()));
/// # let _ = observer;
/// ```
pub struct ObserverFn<F>(pub F);

impl<F> TurnObserver for ObserverFn<F>
where
    F: Fn(&Message) + Send + Sync,
{
    fn on_message(&self, message: &Message) {
        (self.0)(message)
    }
}

//! Replay broadcast channel for per-request comment delivery.
//!
//! One producer emits comments and then signals exactly one terminal
//! event; any number of subscribers observe every emitted item in
//! emission order followed by the terminal event. Subscribers that attach
//! after the terminal signal still receive the full replayed history and
//! the terminal event, and nothing afterwards.
//!
//! A channel is scoped to a single request: the handler constructs a
//! fresh one per invocation and drops it when the response is written, so
//! concurrent requests never share a replay log.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::sync::mpsc;

/// An event observed by a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent<T> {
    /// The next item in emission order.
    Next(T),
    /// The producer finished normally; no further events follow.
    Completed,
    /// The producer signalled failure; no further events follow.
    Failed(String),
}

/// Errors returned by producer-side operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    /// The channel already received its terminal signal.
    #[error("channel is already terminated")]
    Terminated,
}

#[derive(Debug, Clone)]
enum Terminal {
    Completed,
    Failed(String),
}

impl Terminal {
    fn as_event<T>(&self) -> RelayEvent<T> {
        match self {
            Self::Completed => RelayEvent::Completed,
            Self::Failed(message) => RelayEvent::Failed(message.clone()),
        }
    }
}

#[derive(Debug)]
struct ChannelState<T> {
    history: Vec<T>,
    terminal: Option<Terminal>,
    senders: Vec<mpsc::UnboundedSender<RelayEvent<T>>>,
}

/// Replay broadcast channel.
///
/// Cloning yields another handle onto the same channel; producer and
/// subscriber handles may live on different tasks.
#[derive(Debug)]
pub struct ReplayChannel<T> {
    state: Arc<Mutex<ChannelState<T>>>,
}

impl<T> Clone for ReplayChannel<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for ReplayChannel<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(ChannelState {
                history: Vec::new(),
                terminal: None,
                senders: Vec::new(),
            })),
        }
    }
}

impl<T: Clone> ReplayChannel<T> {
    /// Creates an open channel with no history and no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ChannelState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends an item to the replay log and delivers it to every live
    /// subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Terminated`] when the channel already
    /// received `complete` or `fail`.
    pub fn emit(&self, item: T) -> Result<(), RelayError> {
        let mut state = self.lock();
        if state.terminal.is_some() {
            return Err(RelayError::Terminated);
        }
        state
            .senders
            .retain(|sender| sender.send(RelayEvent::Next(item.clone())).is_ok());
        state.history.push(item);
        Ok(())
    }

    /// Marks the sequence finished and delivers the terminal event.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Terminated`] when a terminal signal was
    /// already delivered.
    pub fn complete(&self) -> Result<(), RelayError> {
        self.finish(Terminal::Completed)
    }

    /// Marks the sequence failed and delivers the terminal event.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Terminated`] when a terminal signal was
    /// already delivered.
    pub fn fail(&self, message: impl Into<String>) -> Result<(), RelayError> {
        self.finish(Terminal::Failed(message.into()))
    }

    fn finish(&self, terminal: Terminal) -> Result<(), RelayError> {
        let mut state = self.lock();
        if state.terminal.is_some() {
            return Err(RelayError::Terminated);
        }
        for sender in state.senders.drain(..) {
            let _ignored = sender.send(terminal.as_event());
        }
        state.terminal = Some(terminal);
        Ok(())
    }

    /// Attaches a subscriber.
    ///
    /// The subscription first replays the emission history, then observes
    /// live events. On an already-terminated channel the replayed history
    /// and the terminal event arrive immediately.
    #[must_use]
    pub fn subscribe(&self) -> Subscription<T> {
        let mut state = self.lock();
        let (sender, receiver) = mpsc::unbounded_channel();
        for item in &state.history {
            let _ignored = sender.send(RelayEvent::Next(item.clone()));
        }
        match &state.terminal {
            Some(terminal) => {
                let _ignored = sender.send(terminal.as_event());
            }
            None => state.senders.push(sender),
        }
        Subscription { receiver }
    }
}

/// Consumer side of a [`ReplayChannel`].
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: mpsc::UnboundedReceiver<RelayEvent<T>>,
}

impl<T> Subscription<T> {
    /// Receives the next event, or `None` once the terminal event has
    /// been consumed and the channel is finished with this subscriber.
    pub async fn recv(&mut self) -> Option<RelayEvent<T>> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::{RelayError, RelayEvent, ReplayChannel};

    async fn drain(mut subscription: super::Subscription<u32>) -> Vec<RelayEvent<u32>> {
        let mut events = Vec::new();
        while let Some(event) = subscription.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn early_subscriber_sees_items_in_order_then_completion() {
        let channel = ReplayChannel::new();
        let subscription = channel.subscribe();

        channel.emit(1).expect("emit should succeed");
        channel.emit(2).expect("emit should succeed");
        channel.emit(3).expect("emit should succeed");
        channel.complete().expect("complete should succeed");

        assert_eq!(
            drain(subscription).await,
            vec![
                RelayEvent::Next(1),
                RelayEvent::Next(2),
                RelayEvent::Next(3),
                RelayEvent::Completed,
            ]
        );
    }

    #[tokio::test]
    async fn late_subscriber_replays_history_then_completion() {
        let channel = ReplayChannel::new();
        channel.emit(7).expect("emit should succeed");
        channel.emit(8).expect("emit should succeed");
        channel.complete().expect("complete should succeed");

        let subscription = channel.subscribe();
        assert_eq!(
            drain(subscription).await,
            vec![
                RelayEvent::Next(7),
                RelayEvent::Next(8),
                RelayEvent::Completed,
            ]
        );
    }

    #[tokio::test]
    async fn mid_sequence_subscriber_replays_then_goes_live() {
        let channel = ReplayChannel::new();
        channel.emit(1).expect("emit should succeed");

        let subscription = channel.subscribe();
        channel.emit(2).expect("emit should succeed");
        channel.complete().expect("complete should succeed");

        assert_eq!(
            drain(subscription).await,
            vec![
                RelayEvent::Next(1),
                RelayEvent::Next(2),
                RelayEvent::Completed,
            ]
        );
    }

    #[tokio::test]
    async fn every_subscriber_observes_the_full_sequence_exactly_once() {
        let channel = ReplayChannel::new();
        let first = channel.subscribe();
        let second = channel.subscribe();

        channel.emit(5).expect("emit should succeed");
        channel.complete().expect("complete should succeed");

        let expected = vec![RelayEvent::Next(5), RelayEvent::Completed];
        assert_eq!(drain(first).await, expected);
        assert_eq!(drain(second).await, expected);
    }

    #[tokio::test]
    async fn producer_calls_after_terminal_are_rejected() {
        let channel = ReplayChannel::new();
        channel.emit(1).expect("emit should succeed");
        channel.complete().expect("complete should succeed");

        assert_eq!(channel.emit(2), Err(RelayError::Terminated));
        assert_eq!(channel.complete(), Err(RelayError::Terminated));
        assert_eq!(channel.fail("late"), Err(RelayError::Terminated));
    }

    #[tokio::test]
    async fn failure_is_delivered_and_replayed() {
        let channel = ReplayChannel::new();
        let early = channel.subscribe();
        channel.emit(1).expect("emit should succeed");
        channel.fail("upstream went away").expect("fail should succeed");

        let expected = vec![
            RelayEvent::Next(1),
            RelayEvent::Failed("upstream went away".to_owned()),
        ];
        assert_eq!(drain(early).await, expected);
        assert_eq!(drain(channel.subscribe()).await, expected);
    }

    #[tokio::test]
    async fn dropped_subscriber_does_not_block_emission() {
        let channel = ReplayChannel::new();
        drop(channel.subscribe());

        channel.emit(1).expect("emit should succeed");
        channel.complete().expect("complete should succeed");

        assert_eq!(
            drain(channel.subscribe()).await,
            vec![RelayEvent::Next(1), RelayEvent::Completed]
        );
    }
}

//! Game process lifecycle events
//!
//! Observers registered with `register` are called synchronously on the
//! emitting thread. Async consumers subscribe to the broadcast channel.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;

/// Signals raised around the game process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// About to start the process
    GameProcessStarting,
    /// Process started successfully
    GameProcessStarted,
    /// Process exited, or failed to start
    GameProcessExited,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleEvent::GameProcessStarting => "GameProcessStarting",
            LifecycleEvent::GameProcessStarted => "GameProcessStarted",
            LifecycleEvent::GameProcessExited => "GameProcessExited",
        };
        f.write_str(name)
    }
}

type Observer = Arc<dyn Fn(LifecycleEvent) + Send + Sync>;

/// Subscription handle for receiving lifecycle events
pub struct LifecycleSubscription {
    receiver: broadcast::Receiver<LifecycleEvent>,
}

impl LifecycleSubscription {
    /// Receive the next event, waiting if necessary
    pub async fn recv(&mut self) -> Option<LifecycleEvent> {
        match self.receiver.recv().await {
            Ok(event) => Some(event),
            Err(broadcast::error::RecvError::Closed) => None,
            Err(broadcast::error::RecvError::Lagged(count)) => {
                warn!("Lifecycle subscriber lagged by {} events", count);
                self.receiver.recv().await.ok()
            }
        }
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&mut self) -> Option<LifecycleEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(broadcast::error::TryRecvError::Empty) => None,
            Err(broadcast::error::TryRecvError::Closed) => None,
            Err(broadcast::error::TryRecvError::Lagged(count)) => {
                warn!("Lifecycle subscriber lagged by {} events", count);
                self.try_recv()
            }
        }
    }
}

/// Observer list plus broadcast channel for lifecycle events
#[derive(Clone)]
pub struct LifecycleEvents {
    observers: Arc<RwLock<Vec<Observer>>>,
    sender: broadcast::Sender<LifecycleEvent>,
}

impl LifecycleEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            observers: Arc::new(RwLock::new(Vec::new())),
            sender,
        }
    }

    /// Register a synchronous observer
    pub fn register<F>(&self, observer: F)
    where
        F: Fn(LifecycleEvent) + Send + Sync + 'static,
    {
        self.observers.write().push(Arc::new(observer));
    }

    /// Subscribe to the broadcast channel
    pub fn subscribe(&self) -> LifecycleSubscription {
        LifecycleSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Deliver an event to every observer and subscriber
    pub fn emit(&self, event: LifecycleEvent) {
        debug!("Lifecycle event: {}", event);

        // Observers may register others; call them outside the lock
        let observers: Vec<Observer> = self.observers.read().clone();
        for observer in observers {
            observer(event);
        }

        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for LifecycleEvents {
    fn default() -> Self {
        Self::new(64)
    }
}

impl fmt::Debug for LifecycleEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleEvents")
            .field("observers", &self.observer_count())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

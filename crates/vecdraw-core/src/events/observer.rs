use super::change::{ChangeKind, DrawingEvent};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Subscription handle for unsubscribing from drawing events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific change kinds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these kinds.
    Kinds(Vec<ChangeKind>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &DrawingEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Kinds(kinds) => kinds.contains(&event.kind),
        }
    }
}

/// Receiver of drawing change notifications.
///
/// Implemented for every `Fn(&DrawingEvent) + Send + Sync` closure.
pub trait DrawingObserver: Send + Sync {
    fn drawing_changed(&self, event: &DrawingEvent);
}

impl<F> DrawingObserver for F
where
    F: Fn(&DrawingEvent) + Send + Sync,
{
    fn drawing_changed(&self, event: &DrawingEvent) {
        self(event)
    }
}

struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    observer: Arc<dyn DrawingObserver>,
}

/// Ordered list of observers. Delivery follows subscription order.
#[derive(Default)]
pub struct ObserverRegistry {
    subscriptions: Vec<Subscription>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer, returning the handle used to unsubscribe
    pub fn subscribe<O>(&mut self, filter: EventFilter, observer: O) -> SubscriptionId
    where
        O: DrawingObserver + 'static,
    {
        self.subscribe_shared(filter, Arc::new(observer))
    }

    /// Register an observer the caller keeps a handle to
    pub fn subscribe_shared(
        &mut self,
        filter: EventFilter,
        observer: Arc<dyn DrawingObserver>,
    ) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.subscriptions.push(Subscription {
            id,
            filter,
            observer,
        });
        tracing::debug!("Observer {} subscribed", id);
        id
    }

    /// Remove an observer. Returns false if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        let removed = self.subscriptions.len() != before;
        if removed {
            tracing::debug!("Observer {} unsubscribed", id);
        }
        removed
    }

    /// Deliver an event to every matching observer
    pub fn notify(&self, event: &DrawingEvent) {
        for subscription in &self.subscriptions {
            if subscription.filter.matches(event) {
                subscription.observer.drawing_changed(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

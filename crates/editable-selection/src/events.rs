//! Minimal publish/subscribe plumbing shared by the document model and the
//! selection controller.
//!
//! Every component owns its own [`Emitter`] over a closed event enum. Each
//! event enum names its variants through a plain `Copy` kind tag, so
//! subscribers can listen to one kind or to everything.

use std::fmt;

/// Event enums that can report which kind of event they are
pub trait Tagged {
    type Kind: Copy + PartialEq + fmt::Debug;

    fn kind(&self) -> Self::Kind;
}

/// Handle returned by [`Emitter::subscribe`], used to unsubscribe
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Box<dyn FnMut(&E)>;

struct Subscription<E: Tagged> {
    id: SubscriptionId,
    filter: Option<E::Kind>,
    handler: Handler<E>,
}

pub struct Emitter<E: Tagged> {
    subscriptions: Vec<Subscription<E>>,
    next_id: u64,
}

impl<E: Tagged> Default for Emitter<E> {
    fn default() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E: Tagged> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl<E: Tagged> Emitter<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to events of one kind
    pub fn subscribe(&mut self, kind: E::Kind, handler: impl FnMut(&E) + 'static) -> SubscriptionId {
        self.insert(Some(kind), Box::new(handler))
    }

    /// Listen to every event
    pub fn subscribe_all(&mut self, handler: impl FnMut(&E) + 'static) -> SubscriptionId {
        self.insert(None, Box::new(handler))
    }

    /// Returns false when the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver to every matching subscriber, in subscription order
    pub fn emit(&mut self, event: &E) {
        let kind = event.kind();
        log::trace!("emit {kind:?} to {} subscriber(s)", self.subscriptions.len());
        for subscription in &mut self.subscriptions {
            if subscription.filter.is_none_or(|filter| filter == kind) {
                (subscription.handler)(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Drop every subscription
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    fn insert(&mut self, filter: Option<E::Kind>, handler: Handler<E>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            filter,
            handler,
        });
        id
    }
}

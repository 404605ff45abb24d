// Chunk: docs/chunks/change_notification - Deferred text/selection change notification

//! Per-model observer registry.
//!
//! Events raised while a [`TextModel`] call is running are queued here and
//! delivered when that call returns, so listeners only ever see the model in
//! a consistent state. Listeners are handed `&TextModel` and cannot mutate it
//! during delivery.
//!
//! Delivery is synchronous, in subscription order, with events in the order
//! they were first raised. An event raised twice during one call is
//! delivered once.

use std::fmt;

use crate::model::TextModel;

/// Payload-free change notifications; listeners re-query the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelEvent {
    TextModified,
    SelectionChanged,
}

/// Receives [`ModelEvent`]s from a [`TextModel`].
pub trait ModelListener {
    fn on_event(&mut self, event: ModelEvent, model: &TextModel);
}

impl<F> ModelListener for F
where
    F: FnMut(ModelEvent, &TextModel),
{
    fn on_event(&mut self, event: ModelEvent, model: &TextModel) {
        self(event, model)
    }
}

/// Handle returned by [`ChangeNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listeners = Vec<(ListenerId, Box<dyn ModelListener>)>;

#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Listeners,
    pending: Vec<ModelEvent>,
    next_id: u64,
}

/// Events and listeners moved out of the notifier for one delivery round.
pub(crate) struct Delivery {
    pub(crate) events: Vec<ModelEvent>,
    pub(crate) listeners: Listeners,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. Listeners are called in registration order.
    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: ModelListener + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        tracing::debug!(?id, count = self.listeners.len(), "listener subscribed");
        id
    }

    /// Removes a listener. Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        before != self.listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Queues a `TextModified` event.
    pub fn notify_text_modified(&mut self) {
        self.queue(ModelEvent::TextModified);
    }

    /// Queues a `SelectionChanged` event.
    pub fn notify_selection_changed(&mut self) {
        self.queue(ModelEvent::SelectionChanged);
    }

    fn queue(&mut self, event: ModelEvent) {
        if !self.pending.contains(&event) {
            self.pending.push(event);
        }
    }

    /// Returns the events queued since the last delivery.
    pub fn pending(&self) -> &[ModelEvent] {
        &self.pending
    }

    /// Takes the queued events and the listeners for delivery. Returns `None`
    /// when nothing is queued.
    ///
    /// Pending events are dropped when there is no one to deliver them to.
    pub(crate) fn begin_delivery(&mut self) -> Option<Delivery> {
        if self.pending.is_empty() {
            return None;
        }
        let events = std::mem::take(&mut self.pending);
        if self.listeners.is_empty() {
            return None;
        }
        Some(Delivery {
            events,
            listeners: std::mem::take(&mut self.listeners),
        })
    }

    /// Puts the listeners back after delivery.
    pub(crate) fn end_delivery(&mut self, listeners: Listeners) {
        debug_assert!(self.listeners.is_empty());
        self.listeners = listeners;
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_dedups_and_keeps_order() {
        let mut notifier = ChangeNotifier::new();
        notifier.notify_selection_changed();
        notifier.notify_text_modified();
        notifier.notify_selection_changed();
        assert_eq!(
            notifier.pending(),
            &[ModelEvent::SelectionChanged, ModelEvent::TextModified]
        );
    }

    #[test]
    fn test_subscribe_unsubscribe() {
        let mut notifier = ChangeNotifier::new();
        let a = notifier.subscribe(|_: ModelEvent, _: &TextModel| {});
        let b = notifier.subscribe(|_: ModelEvent, _: &TextModel| {});
        assert_ne!(a, b);
        assert_eq!(notifier.listener_count(), 2);
        assert!(notifier.unsubscribe(a));
        assert!(!notifier.unsubscribe(a));
        assert_eq!(notifier.listener_count(), 1);
    }

    #[test]
    fn test_begin_delivery_without_listeners_drops_events() {
        let mut notifier = ChangeNotifier::new();
        notifier.notify_text_modified();
        assert!(notifier.begin_delivery().is_none());
        assert!(notifier.pending().is_empty());
    }

    #[test]
    fn test_begin_delivery_moves_listeners_out() {
        let mut notifier = ChangeNotifier::new();
        notifier.subscribe(|_: ModelEvent, _: &TextModel| {});
        notifier.notify_text_modified();

        let delivery = notifier.begin_delivery().expect("one event queued");
        assert_eq!(delivery.events, vec![ModelEvent::TextModified]);
        assert_eq!(notifier.listener_count(), 0);

        notifier.end_delivery(delivery.listeners);
        assert_eq!(notifier.listener_count(), 1);
        assert!(notifier.begin_delivery().is_none());
    }
}

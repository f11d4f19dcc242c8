/// An event stamped with the index of the frame during which it was raised.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<E> {
    pub frame_index: u64,
    pub payload: E,
}

/// Ordered, single-threaded event queue.
///
/// Producers push during input handling or a tick; the owner drains once per
/// frame. Order of emission is preserved.
#[derive(Debug)]
pub struct EventBus<E> {
    events: Vec<Event<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, frame_index: u64, payload: E) {
        self.events.push(Event {
            frame_index,
            payload,
        });
    }

    pub fn events(&self) -> &[Event<E>] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Event<E>> {
        std::mem::take(&mut self.events)
    }
}

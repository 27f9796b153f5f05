mod bus;
mod events;

pub use bus::EventBus;
pub use events::EditorEvent;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &EditorEvent);
}

/// Adapts a closure into an `EventHandler`
pub struct FnHandler<F> {
    callback: F,
}

impl<F> FnHandler<F>
where
    F: FnMut(&EditorEvent) + Send,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> EventHandler for FnHandler<F>
where
    F: FnMut(&EditorEvent) + Send,
{
    fn handle_event(&mut self, event: &EditorEvent) {
        (self.callback)(event);
    }
}

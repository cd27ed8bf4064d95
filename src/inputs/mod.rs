pub mod event_source;
pub mod shortcut;

pub use event_source::{EventKind, EventSource, PageEvent, SimulatedEventSource};
pub use shortcut::is_toggle_shortcut;

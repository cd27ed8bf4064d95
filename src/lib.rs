pub mod config;
pub mod controller;
pub mod highlight;
pub mod hint;
pub mod inputs;
pub mod layout;
pub mod page;
pub mod panic_handler;
pub mod prerender;
pub mod slug;
pub mod storage;
pub mod timers;
pub mod toc;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::TocConfig;
pub use controller::{EventOutcome, TocController, run_with_event_source};
pub use inputs::event_source;
pub use layout::{Bounds, Geometry, StaticGeometry, Viewport};
pub use page::Page;
pub use storage::{FileStore, KeyValueStore, MemoryStore};

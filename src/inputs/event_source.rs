use crate::page::Handle;
use anyhow::Result;
pub use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// Events delivered to the TOC controller by its host page.
#[derive(Debug, Clone)]
pub enum PageEvent {
    Click { target: Handle },
    Hover { target: Handle },
    KeyDown(KeyEvent),
    /// The document scrolled to `y`.
    Scroll { y: f64 },
    Resize { width: f64, height: f64 },
    /// The page clock reached this offset since load.
    Tick(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Hover,
    KeyDown,
    Scroll,
    Resize,
    Tick,
}

impl PageEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PageEvent::Click { .. } => EventKind::Click,
            PageEvent::Hover { .. } => EventKind::Hover,
            PageEvent::KeyDown(_) => EventKind::KeyDown,
            PageEvent::Scroll { .. } => EventKind::Scroll,
            PageEvent::Resize { .. } => EventKind::Resize,
            PageEvent::Tick(_) => EventKind::Tick,
        }
    }
}

/// Trait for abstracting event sources to enable testing
pub trait EventSource {
    /// Poll for events with a timeout
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Read the next event
    fn read(&mut self) -> Result<PageEvent>;
}

/// Simulated event source for testing
pub struct SimulatedEventSource {
    pub(crate) events: Vec<PageEvent>,
    current_index: usize,
}

impl SimulatedEventSource {
    pub fn new(events: Vec<PageEvent>) -> Self {
        Self {
            events,
            current_index: 0,
        }
    }

    /// Helper method to create a key event
    pub fn key_event(code: KeyCode, modifiers: KeyModifiers) -> PageEvent {
        PageEvent::KeyDown(KeyEvent::new(code, modifiers))
    }

    /// Helper method to create a Ctrl+char key event
    pub fn ctrl_char_key(c: char) -> PageEvent {
        Self::key_event(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Helper method to create a Cmd+char key event
    pub fn cmd_char_key(c: char) -> PageEvent {
        Self::key_event(KeyCode::Char(c), KeyModifiers::SUPER)
    }

    pub fn click(target: &Handle) -> PageEvent {
        PageEvent::Click {
            target: target.clone(),
        }
    }

    pub fn hover(target: &Handle) -> PageEvent {
        PageEvent::Hover {
            target: target.clone(),
        }
    }

    pub fn scroll(y: f64) -> PageEvent {
        PageEvent::Scroll { y }
    }

    pub fn resize(width: f64, height: f64) -> PageEvent {
        PageEvent::Resize { width, height }
    }

    pub fn tick_ms(millis: u64) -> PageEvent {
        PageEvent::Tick(Duration::from_millis(millis))
    }

    pub fn remaining(&self) -> usize {
        self.events.len() - self.current_index
    }
}

impl EventSource for SimulatedEventSource {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(self.current_index < self.events.len())
    }

    fn read(&mut self) -> Result<PageEvent> {
        match self.events.get(self.current_index) {
            Some(event) => {
                self.current_index += 1;
                Ok(event.clone())
            }
            None => Err(anyhow::anyhow!("Simulated event source is exhausted")),
        }
    }
}

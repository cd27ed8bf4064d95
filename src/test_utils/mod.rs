pub mod fake_pages;

pub mod test_helpers {
    use crate::config::TocConfig;
    use crate::controller::TocController;
    use crate::event_source::{KeyCode, KeyModifiers, PageEvent, SimulatedEventSource};
    use crate::layout::{StaticGeometry, Viewport};
    use crate::page::{Handle, Page};
    use crate::storage::MemoryStore;

    /// Builder for creating test scenarios with simulated page events
    pub struct TestScenarioBuilder {
        events: Vec<PageEvent>,
    }

    impl Default for TestScenarioBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TestScenarioBuilder {
        pub fn new() -> Self {
            Self { events: Vec::new() }
        }

        pub fn click(mut self, target: &Handle) -> Self {
            self.events.push(SimulatedEventSource::click(target));
            self
        }

        pub fn hover(mut self, target: &Handle) -> Self {
            self.events.push(SimulatedEventSource::hover(target));
            self
        }

        /// Press Ctrl+T
        pub fn press_ctrl_t(mut self) -> Self {
            self.events.push(SimulatedEventSource::ctrl_char_key('t'));
            self
        }

        /// Press Cmd+T
        pub fn press_cmd_t(mut self) -> Self {
            self.events.push(SimulatedEventSource::cmd_char_key('t'));
            self
        }

        pub fn press_key(mut self, code: KeyCode, modifiers: KeyModifiers) -> Self {
            self.events
                .push(SimulatedEventSource::key_event(code, modifiers));
            self
        }

        pub fn scroll_to(mut self, y: f64) -> Self {
            self.events.push(SimulatedEventSource::scroll(y));
            self
        }

        pub fn resize(mut self, width: f64, height: f64) -> Self {
            self.events.push(SimulatedEventSource::resize(width, height));
            self
        }

        /// Advance the page clock to `millis` after load
        pub fn wait_until_ms(mut self, millis: u64) -> Self {
            self.events.push(SimulatedEventSource::tick_ms(millis));
            self
        }

        /// Build the simulated event source
        pub fn build(self) -> SimulatedEventSource {
            SimulatedEventSource::new(self.events)
        }
    }

    /// A controller over `page` with in-memory storage, default config, and a 1280x1000 viewport.
    pub fn create_test_controller<'a>(
        page: &'a Page,
        store: MemoryStore,
        geometry: StaticGeometry,
    ) -> TocController<'a, MemoryStore, StaticGeometry> {
        TocController::init(
            page,
            TocConfig::default(),
            store,
            geometry,
            Viewport::new(1280.0, 1000.0),
        )
        .expect("test page has no TOC container")
    }
}

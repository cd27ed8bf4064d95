//! The TOC sidebar controller.
//!
//! [`TocController`] owns all TOC interactivity for one page load: collapse
//! state and its persistence, link repair, scroll highlighting, smooth
//! navigation, the floating toggle button, and hints. Hosts feed it
//! [`PageEvent`]s through [`TocController::handle_event`] (or
//! [`run_with_event_source`]) and act on the returned [`EventOutcome`].

use crate::config::TocConfig;
use crate::highlight::{DetectionBand, VisibilityTracker};
use crate::hint::{Hint, HintKind, HintManager};
use crate::inputs::{EventKind, EventSource, PageEvent, is_toggle_shortcut};
use crate::layout::{Geometry, Viewport};
use crate::page::{Handle, Page, dom};
use crate::storage::{KeyValueStore, TOC_COLLAPSED_KEY, TOC_HINT_SHOWN_KEY};
use crate::timers::{TimerKind, TimerQueue};
use crate::toc::{self, ACTIVE_CLASS, Heading, RepairOutcome, TocEntry};
use anyhow::Result;
use crossterm::event::KeyEvent;
use log::{debug, error, info};
use std::collections::HashSet;
use std::time::Duration;

pub const HINT_CLASS: &str = "toc-hint";
pub const TOGGLE_BUTTON_CLASS: &str = "toc-toggle-btn";
pub const SHOW_CLASS: &str = "show";
pub const HIDDEN_CLASS: &str = "hidden";

const CLOSE_GLYPH: &str = "\u{00d7}";
const OPEN_GLYPH: &str = "\u{2630}";

pub const COLLAPSED_HINT: &str = "Table of contents hidden. Click it or press Ctrl+T to show it again";
pub const EXPANDED_HINT: &str = "Table of contents shown. Press Ctrl+T to hide it";
pub const HOVER_COLLAPSED_HINT: &str = "Click to expand the table of contents";
pub const HOVER_EXPANDED_HINT: &str = "Click to collapse the table of contents";
pub const FIRST_VISIT_HINT: &str =
    "Tip: click the table of contents title or press Ctrl+T (Cmd+T on macOS) to hide or show it";

const ALL_EVENTS: [EventKind; 6] = [
    EventKind::Click,
    EventKind::Hover,
    EventKind::KeyDown,
    EventKind::Scroll,
    EventKind::Resize,
    EventKind::Tick,
];

/// What the host should do after an event was handled.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EventOutcome {
    /// The host's default action (navigation, browser shortcut) must not run.
    pub default_prevented: bool,
    /// Animated scroll the host should perform to this document offset.
    pub scroll_to: Option<f64>,
}

impl EventOutcome {
    fn prevented() -> Self {
        Self {
            default_prevented: true,
            scroll_to: None,
        }
    }
}

pub struct TocController<'a, S: KeyValueStore, G: Geometry> {
    page: &'a Page,
    config: TocConfig,
    store: S,
    geometry: G,

    container: Handle,
    title: Option<Handle>,
    toggle_button: Handle,
    hint_element: Handle,
    headings: Vec<Heading>,
    entries: Vec<TocEntry>,
    repair: RepairOutcome,

    collapsed: bool,
    viewport: Viewport,
    tracker: VisibilityTracker,
    hints: HintManager,
    timers: TimerQueue,
    now: Duration,
    subscriptions: HashSet<EventKind>,
}

impl<'a, S: KeyValueStore, G: Geometry> TocController<'a, S, G> {
    /// Attach to `page`. Returns `None`, without touching the page, when it has no TOC container.
    pub fn init(
        page: &'a Page,
        config: TocConfig,
        store: S,
        geometry: G,
        viewport: Viewport,
    ) -> Option<Self> {
        let Some(container) = page.find_by_class(&config.container_class) else {
            debug!(
                "No .{} element on the page; TOC controller stays idle",
                config.container_class
            );
            return None;
        };

        let mount = page.mount_point();
        let hint_element = dom::create_element("div", &[("class", HINT_CLASS)]);
        let toggle_button = dom::create_element(
            "button",
            &[("class", TOGGLE_BUTTON_CLASS), ("type", "button")],
        );
        dom::append_child(&mount, hint_element.clone());
        dom::append_child(&mount, toggle_button.clone());

        let collapsed = store.get(TOC_COLLAPSED_KEY).as_deref() == Some("true");
        let title = dom::find_by_class(&container, &config.title_class);
        let headings = toc::collect_headings(page, Some(&container));
        let entries = toc::collect_entries(&container, &config);
        let band = DetectionBand::new(config.band_top_margin, config.band_bottom_margin);

        let mut controller = Self {
            page,
            config,
            store,
            geometry,
            container,
            title,
            toggle_button,
            hint_element,
            headings,
            entries,
            repair: RepairOutcome::default(),
            collapsed,
            viewport,
            tracker: VisibilityTracker::new(band),
            hints: HintManager::new(),
            timers: TimerQueue::new(),
            now: Duration::ZERO,
            subscriptions: HashSet::new(),
        };

        dom::set_class(&controller.container, &controller.config.collapsed_class, collapsed);

        controller.repair = toc::repair_links(&controller.headings, &controller.entries);
        for heading in &controller.headings {
            if let Some(id) = heading.id() {
                controller.tracker.observe(&id);
            }
        }

        for kind in ALL_EVENTS {
            controller.subscribe(kind);
        }

        controller.sync_toggle_button();
        controller.update_highlight();

        if controller.store.get(TOC_HINT_SHOWN_KEY).as_deref() != Some("true") {
            let deadline = controller.now + controller.config.first_visit_delay();
            controller.timers.schedule(deadline, TimerKind::FirstVisitHint);
        }

        info!(
            "TOC controller ready: {} headings, {} entries ({} repaired, {} unmatched), collapsed={}",
            controller.headings.len(),
            controller.entries.len(),
            controller.repair.repaired.len(),
            controller.repair.unmatched.len(),
            controller.collapsed
        );

        Some(controller)
    }

    pub fn page(&self) -> &'a Page {
        self.page
    }

    pub fn config(&self) -> &TocConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn container(&self) -> &Handle {
        &self.container
    }

    pub fn title(&self) -> Option<&Handle> {
        self.title.as_ref()
    }

    pub fn toggle_button(&self) -> &Handle {
        &self.toggle_button
    }

    pub fn hint_element(&self) -> &Handle {
        &self.hint_element
    }

    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    pub fn repair_outcome(&self) -> &RepairOutcome {
        &self.repair
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn is_toggle_button_visible(&self) -> bool {
        !dom::has_class(&self.toggle_button, HIDDEN_CLASS)
    }

    pub fn current_hint(&self) -> Option<&Hint> {
        self.hints.current()
    }

    pub fn hints_shown(&self) -> usize {
        self.hints.shown_count()
    }

    pub fn active_entries(&self) -> Vec<&TocEntry> {
        self.entries.iter().filter(|e| e.is_active()).collect()
    }

    pub fn subscribe(&mut self, kind: EventKind) {
        self.subscriptions.insert(kind);
    }

    pub fn unsubscribe(&mut self, kind: EventKind) {
        self.subscriptions.remove(&kind);
    }

    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.subscriptions.contains(&kind)
    }

    /// Stop reacting to events and drop pending timers; the DOM keeps its current state.
    pub fn detach(&mut self) {
        self.subscriptions.clear();
        self.timers.clear();
        self.tracker.unobserve_all();
    }

    pub fn handle_event(&mut self, event: &PageEvent) -> EventOutcome {
        if !self.is_subscribed(event.kind()) {
            return EventOutcome::default();
        }

        match event {
            PageEvent::Click { target } => self.on_click(target),
            PageEvent::Hover { target } => {
                self.on_hover(target);
                EventOutcome::default()
            }
            PageEvent::KeyDown(key) => self.on_key_down(key),
            PageEvent::Scroll { y } => {
                self.on_scroll(*y);
                EventOutcome::default()
            }
            PageEvent::Resize { width, height } => {
                self.on_resize(*width, *height);
                EventOutcome::default()
            }
            PageEvent::Tick(now) => {
                self.advance_clock(*now);
                EventOutcome::default()
            }
        }
    }

    /// Flip between Expanded and Collapsed, persist the new state, and announce it.
    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
        debug!("TOC toggled; collapsed={}", self.collapsed);

        dom::set_class(&self.container, &self.config.collapsed_class, self.collapsed);
        let value = if self.collapsed { "true" } else { "false" };
        if let Err(e) = self.store.set(TOC_COLLAPSED_KEY, value) {
            error!("Failed to persist TOC state: {e}");
        }

        self.sync_toggle_button();

        let message = if self.collapsed {
            COLLAPSED_HINT
        } else {
            EXPANDED_HINT
        };
        self.show_hint(message, HintKind::Toggle, self.config.hint_duration());
    }

    pub fn on_click(&mut self, target: &Handle) -> EventOutcome {
        if dom::is_inclusive_descendant(target, &self.toggle_button) {
            self.toggle();
            return EventOutcome::default();
        }

        if self.is_on_title(target) {
            self.toggle();
            return EventOutcome::default();
        }

        if !dom::is_inclusive_descendant(target, &self.container) {
            return EventOutcome::default();
        }

        // A link navigates first; a collapsed TOC then expands around it.
        let navigation = self
            .entries
            .iter()
            .find(|entry| dom::is_inclusive_descendant(target, &entry.element))
            .map(|entry| EventOutcome {
                default_prevented: true,
                scroll_to: self.navigation_offset(entry),
            });

        if self.collapsed {
            self.toggle();
            return navigation.unwrap_or_else(EventOutcome::prevented);
        }

        navigation.unwrap_or_default()
    }

    pub fn on_hover(&mut self, target: &Handle) {
        let over_collapsed_body =
            self.collapsed && dom::is_inclusive_descendant(target, &self.container);
        if !(self.is_on_title(target) || over_collapsed_body) {
            return;
        }
        if self.hints.is_showing() {
            return;
        }

        let message = if self.collapsed {
            HOVER_COLLAPSED_HINT
        } else {
            HOVER_EXPANDED_HINT
        };
        self.show_hint(message, HintKind::Hover, self.config.hint_duration());
    }

    pub fn on_key_down(&mut self, key: &KeyEvent) -> EventOutcome {
        if is_toggle_shortcut(key) {
            self.toggle();
            EventOutcome::prevented()
        } else {
            EventOutcome::default()
        }
    }

    pub fn on_scroll(&mut self, y: f64) {
        self.viewport.scroll_to(y);
        self.update_highlight();
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
        self.sync_toggle_button();
        self.update_highlight();
    }

    /// Move the page clock forward and fire any timers that came due.
    pub fn advance_clock(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }

        for timer in self.timers.take_due(self.now) {
            match timer {
                TimerKind::DismissHint => {
                    if self.hints.update(self.now) {
                        dom::remove_class(&self.hint_element, SHOW_CLASS);
                    }
                }
                TimerKind::FirstVisitHint => self.show_first_visit_hint(),
            }
        }
    }

    /// Scroll offset for smooth navigation to an entry's heading.
    pub fn navigation_offset(&self, entry: &TocEntry) -> Option<f64> {
        let target = entry.target()?;
        let bounds = self.geometry.bounds(&target)?;
        Some(bounds.top - self.config.header_offset)
    }

    fn is_on_title(&self, target: &Handle) -> bool {
        self.title
            .as_ref()
            .is_some_and(|title| dom::is_inclusive_descendant(target, title))
    }

    fn show_first_visit_hint(&mut self) {
        self.show_hint(
            FIRST_VISIT_HINT,
            HintKind::FirstVisit,
            self.config.first_visit_hint_duration(),
        );
        if let Err(e) = self.store.set(TOC_HINT_SHOWN_KEY, "true") {
            error!("Failed to persist first-visit hint flag: {e}");
        }
    }

    fn show_hint(&mut self, message: &str, kind: HintKind, timeout: Duration) {
        let hint = Hint::new(message, kind, self.now, timeout);
        self.timers.schedule(hint.expires_at(), TimerKind::DismissHint);
        self.hints.show(hint);

        dom::set_text(&self.hint_element, message);
        dom::add_class(&self.hint_element, SHOW_CLASS);
    }

    /// Button is shown only above the mobile breakpoint and while expanded.
    fn sync_toggle_button(&self) {
        let is_mobile = self.viewport.width <= self.config.mobile_breakpoint;
        let visible = !is_mobile && !self.collapsed;
        dom::set_class(&self.toggle_button, HIDDEN_CLASS, !visible);

        if self.collapsed {
            dom::set_text(&self.toggle_button, OPEN_GLYPH);
            dom::set_attr(&self.toggle_button, "title", "Show table of contents");
        } else {
            dom::set_text(&self.toggle_button, CLOSE_GLYPH);
            dom::set_attr(&self.toggle_button, "title", "Hide table of contents");
        }
    }

    fn update_highlight(&mut self) {
        let entered = self.tracker.update(&self.viewport, &self.geometry);
        for id in entered {
            for entry in &self.entries {
                dom::remove_class(&entry.element, ACTIVE_CLASS);
            }
            if let Some(entry) = self
                .entries
                .iter()
                .find(|entry| entry.target().as_deref() == Some(id.as_str()))
            {
                dom::add_class(&entry.element, ACTIVE_CLASS);
                debug!("Heading {id:?} entered the detection band");
            }
        }
    }
}

/// Feed every event from `source` to the controller until the source runs dry.
///
/// Scroll requests are completed immediately by delivering the matching scroll event.
pub fn run_with_event_source<S: KeyValueStore, G: Geometry>(
    controller: &mut TocController<'_, S, G>,
    event_source: &mut dyn EventSource,
) -> Result<()> {
    while event_source.poll(Duration::from_millis(0))? {
        let event = event_source.read()?;
        let outcome = controller.handle_event(&event);
        if let Some(y) = outcome.scroll_to {
            controller.handle_event(&PageEvent::Scroll { y });
        }
    }
    Ok(())
}

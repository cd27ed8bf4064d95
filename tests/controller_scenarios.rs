use toc_sidebar::controller::{FIRST_VISIT_HINT, TocController};
use toc_sidebar::event_source::PageEvent;
use toc_sidebar::hint::HintKind;
use toc_sidebar::page::dom;
use toc_sidebar::storage::{KeyValueStore, TOC_COLLAPSED_KEY, TOC_HINT_SHOWN_KEY};
use toc_sidebar::test_utils::fake_pages::{
    FakePageConfig, SECTION_HEIGHT, create_fake_page_html, stacked_geometry,
};
use toc_sidebar::test_utils::test_helpers::{TestScenarioBuilder, create_test_controller};
use toc_sidebar::{MemoryStore, Page, StaticGeometry, TocConfig, Viewport, run_with_event_source};

fn fake_page() -> (Page, StaticGeometry) {
    let config = FakePageConfig::default();
    let page = Page::parse(&create_fake_page_html(&config)).unwrap();
    (page, stacked_geometry(&config))
}

fn returning_visitor() -> MemoryStore {
    MemoryStore::with_entries(&[(TOC_HINT_SHOWN_KEY, "true")])
}

#[test]
fn test_page_without_toc_is_left_untouched() {
    let config = FakePageConfig {
        include_toc: false,
        ..FakePageConfig::default()
    };
    let page = Page::parse(&create_fake_page_html(&config)).unwrap();
    let before = page.to_html().unwrap();

    let controller = TocController::init(
        &page,
        TocConfig::default(),
        MemoryStore::new(),
        stacked_geometry(&config),
        Viewport::default(),
    );

    assert!(controller.is_none());
    assert_eq!(page.to_html().unwrap(), before);
}

#[test]
fn test_link_repair_slugifies_matching_heading() {
    let (page, geometry) = fake_page();
    let controller = create_test_controller(&page, returning_visitor(), geometry);

    let entry = &controller.entries()[0];
    assert_eq!(entry.label, "Intro Section");
    assert_eq!(entry.target().as_deref(), Some("intro-section"));

    let heading = page.find_by_id("intro-section").unwrap();
    assert_eq!(dom::text_content(&heading), "Intro Section");
    assert_eq!(controller.repair_outcome().repaired.len(), 4);
}

#[test]
fn test_orphan_entries_stay_unlinked() {
    let config = FakePageConfig {
        orphan_entries: vec!["Changelog".to_string()],
        ..FakePageConfig::default()
    };
    let page = Page::parse(&create_fake_page_html(&config)).unwrap();
    let controller = create_test_controller(&page, returning_visitor(), stacked_geometry(&config));

    let orphan = controller.entries().last().unwrap();
    assert!(orphan.lacks_target());
    assert_eq!(
        controller.repair_outcome().unmatched,
        vec!["Changelog".to_string()]
    );
}

#[test]
fn test_double_toggle_restores_everything() {
    let (page, geometry) = fake_page();
    let mut controller = create_test_controller(&page, returning_visitor(), geometry);

    let class_before = dom::get_attr(controller.container(), "class");
    let button_before = page_fragment(controller.toggle_button());

    let mut source = TestScenarioBuilder::new()
        .press_ctrl_t()
        .press_cmd_t()
        .build();
    run_with_event_source(&mut controller, &mut source).unwrap();

    assert!(!controller.is_collapsed());
    assert_eq!(dom::get_attr(controller.container(), "class"), class_before);
    assert_eq!(page_fragment(controller.toggle_button()), button_before);
    assert_eq!(
        controller.store().get(TOC_COLLAPSED_KEY).as_deref(),
        Some("false")
    );
}

fn page_fragment(node: &toc_sidebar::page::Handle) -> (Option<String>, Option<String>, String) {
    (
        dom::get_attr(node, "class"),
        dom::get_attr(node, "title"),
        dom::text_content(node),
    )
}

#[test]
fn test_floating_button_click_collapses_and_hides_it() {
    let (page, geometry) = fake_page();
    let mut controller = create_test_controller(&page, returning_visitor(), geometry);
    assert!(controller.is_toggle_button_visible());
    let button = controller.toggle_button().clone();

    let mut source = TestScenarioBuilder::new().click(&button).build();
    run_with_event_source(&mut controller, &mut source).unwrap();

    assert!(controller.is_collapsed());
    assert!(dom::has_class(controller.container(), "toc-collapsed"));
    assert_eq!(
        controller.store().get(TOC_COLLAPSED_KEY).as_deref(),
        Some("true")
    );
    assert!(!controller.is_toggle_button_visible());
    assert!(dom::has_class(&button, "hidden"));

    let mut source = TestScenarioBuilder::new().press_ctrl_t().build();
    run_with_event_source(&mut controller, &mut source).unwrap();

    assert!(!controller.is_collapsed());
    assert_eq!(
        controller.store().get(TOC_COLLAPSED_KEY).as_deref(),
        Some("false")
    );
    assert!(controller.is_toggle_button_visible());
}

#[test]
fn test_link_click_in_collapsed_toc_expands_and_scrolls() {
    let (page, geometry) = fake_page();
    let mut controller = create_test_controller(&page, returning_visitor(), geometry);
    controller.toggle();
    let faq_link = controller.entries()[3].element.clone();

    let outcome = controller.handle_event(&PageEvent::Click { target: faq_link });
    assert!(!controller.is_collapsed());
    assert!(outcome.default_prevented);
    assert_eq!(outcome.scroll_to, Some(4.0 * SECTION_HEIGHT - 80.0));
}

#[test]
fn test_toggle_state_survives_reload() {
    let (page, geometry) = fake_page();
    let mut controller = create_test_controller(&page, returning_visitor(), geometry.clone());
    let title = controller.title().unwrap().clone();
    controller.handle_event(&PageEvent::Click { target: title });
    assert!(controller.is_collapsed());
    let store = controller.into_store();

    let (reloaded_page, _) = fake_page();
    let reloaded = create_test_controller(&reloaded_page, store, geometry);
    assert!(reloaded.is_collapsed());
    assert!(dom::has_class(reloaded.container(), "toc-collapsed"));
    assert!(!reloaded.is_toggle_button_visible());
}

#[test]
fn test_keyboard_shortcut_prevents_default() {
    let (page, geometry) = fake_page();
    let mut controller = create_test_controller(&page, returning_visitor(), geometry);

    let outcome = controller.handle_event(&toc_sidebar::event_source::SimulatedEventSource::ctrl_char_key('t'));
    assert!(outcome.default_prevented);
    assert!(controller.is_collapsed());

    let outcome = controller.handle_event(&toc_sidebar::event_source::SimulatedEventSource::ctrl_char_key('s'));
    assert!(!outcome.default_prevented);
    assert!(controller.is_collapsed());
}

#[test]
fn test_scrolling_highlights_exactly_one_entry() {
    let (page, geometry) = fake_page();
    let mut controller = create_test_controller(&page, returning_visitor(), geometry);

    // Band is 200..300 below the scroll offset; put "Installation" (top 2000) inside it.
    let mut source = TestScenarioBuilder::new()
        .scroll_to(SECTION_HEIGHT - 250.0)
        .scroll_to(2.0 * SECTION_HEIGHT - 250.0)
        .build();
    run_with_event_source(&mut controller, &mut source).unwrap();

    let active = controller.active_entries();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].label, "Installation");
    assert_eq!(active[0].target().as_deref(), Some("installation"));
}

#[test]
fn test_scrolling_away_keeps_last_highlight() {
    let (page, geometry) = fake_page();
    let mut controller = create_test_controller(&page, returning_visitor(), geometry);

    controller.on_scroll(3.0 * SECTION_HEIGHT - 250.0);
    // Between headings: nothing enters, so the previous highlight stays.
    controller.on_scroll(3.0 * SECTION_HEIGHT + 300.0);

    let active = controller.active_entries();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].label, "Configuration");
}

#[test]
fn test_link_click_scrolls_to_heading_minus_header_offset() {
    let (page, geometry) = fake_page();
    let mut controller = create_test_controller(&page, returning_visitor(), geometry);
    let faq_link = controller.entries()[3].element.clone();

    let mut source = TestScenarioBuilder::new().click(&faq_link).build();
    run_with_event_source(&mut controller, &mut source).unwrap();

    // FAQ sits at 4 * SECTION_HEIGHT.
    assert_eq!(controller.viewport().scroll_y, 4.0 * SECTION_HEIGHT - 80.0);
}

#[test]
fn test_navigation_lands_heading_in_short_viewport_band() {
    let (page, geometry) = fake_page();
    let mut controller = TocController::init(
        &page,
        TocConfig::default(),
        returning_visitor(),
        geometry,
        Viewport::new(1280.0, 400.0),
    )
    .unwrap();
    let faq_link = controller.entries()[3].element.clone();

    let mut source = TestScenarioBuilder::new().click(&faq_link).build();
    run_with_event_source(&mut controller, &mut source).unwrap();

    // 80px below the top of a 400px viewport is inside the 80..120 band.
    let active = controller.active_entries();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].label, "FAQ");
}

#[test]
fn test_link_click_outcome() {
    let (page, geometry) = fake_page();
    let mut controller = create_test_controller(&page, returning_visitor(), geometry);
    let link = controller.entries()[1].element.clone();

    let outcome = controller.handle_event(&PageEvent::Click { target: link });
    assert!(outcome.default_prevented);
    assert_eq!(outcome.scroll_to, Some(2.0 * SECTION_HEIGHT - 80.0));
}

#[test]
fn test_button_hidden_on_narrow_viewport() {
    let (page, geometry) = fake_page();
    let mut controller = create_test_controller(&page, returning_visitor(), geometry);
    assert!(controller.is_toggle_button_visible());

    controller.on_resize(500.0, 800.0);
    assert!(!controller.is_toggle_button_visible());

    // Toggling on a narrow viewport never reveals it.
    controller.toggle();
    controller.toggle();
    assert!(!controller.is_toggle_button_visible());

    controller.on_resize(768.0, 800.0);
    assert!(!controller.is_toggle_button_visible());

    controller.on_resize(1200.0, 800.0);
    assert!(controller.is_toggle_button_visible());

    controller.toggle();
    controller.on_resize(1400.0, 800.0);
    assert!(!controller.is_toggle_button_visible());
}

#[test]
fn test_narrow_viewport_at_load() {
    let (page, geometry) = fake_page();
    let controller = TocController::init(
        &page,
        TocConfig::default(),
        returning_visitor(),
        geometry,
        Viewport::new(500.0, 800.0),
    )
    .unwrap();
    assert!(!controller.is_collapsed());
    assert!(!controller.is_toggle_button_visible());
}

#[test]
fn test_first_visit_hint_shows_once() {
    let (page, geometry) = fake_page();
    let mut controller = create_test_controller(&page, MemoryStore::new(), geometry.clone());

    let mut source = TestScenarioBuilder::new().wait_until_ms(1999).build();
    run_with_event_source(&mut controller, &mut source).unwrap();
    assert!(controller.current_hint().is_none());

    let mut source = TestScenarioBuilder::new().wait_until_ms(2000).build();
    run_with_event_source(&mut controller, &mut source).unwrap();
    let hint = controller.current_hint().unwrap();
    assert_eq!(hint.kind, HintKind::FirstVisit);
    assert_eq!(hint.message, FIRST_VISIT_HINT);
    assert_eq!(
        controller.store().get(TOC_HINT_SHOWN_KEY).as_deref(),
        Some("true")
    );

    // Dismissed 3000ms after it appeared.
    controller.advance_clock(std::time::Duration::from_millis(4999));
    assert!(controller.current_hint().is_some());
    controller.advance_clock(std::time::Duration::from_millis(5000));
    assert!(controller.current_hint().is_none());

    let store = controller.into_store();
    let (reloaded_page, _) = fake_page();
    let mut reloaded = create_test_controller(&reloaded_page, store, geometry);
    reloaded.advance_clock(std::time::Duration::from_secs(30));
    assert!(reloaded.current_hint().is_none());
    assert_eq!(reloaded.hints_shown(), 0);
}

#[test]
fn test_hover_hints_depend_on_state() {
    let (page, geometry) = fake_page();
    let mut controller = create_test_controller(&page, returning_visitor(), geometry);
    let title = controller.title().unwrap().clone();
    let link = controller.entries()[0].element.clone();

    let mut source = TestScenarioBuilder::new()
        .press_ctrl_t()
        .wait_until_ms(3000)
        .hover(&link)
        .build();
    run_with_event_source(&mut controller, &mut source).unwrap();

    let hint = controller.current_hint().unwrap();
    assert_eq!(hint.kind, HintKind::Hover);
    assert_eq!(hint.message, "Click to expand the table of contents");

    let mut source = TestScenarioBuilder::new()
        .wait_until_ms(6000)
        .click(&title)
        .wait_until_ms(9000)
        .hover(&title)
        .build();
    run_with_event_source(&mut controller, &mut source).unwrap();
    assert_eq!(
        controller.current_hint().unwrap().message,
        "Click to collapse the table of contents"
    );
}

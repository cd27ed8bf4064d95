use std::fs;
use tempfile::TempDir;
use toc_sidebar::prerender::prerender;
use toc_sidebar::storage::{FileStore, KeyValueStore, TOC_COLLAPSED_KEY, TOC_HINT_SHOWN_KEY};
use toc_sidebar::test_utils::fake_pages::{FakePageConfig, create_fake_page_html};
use toc_sidebar::{Page, TocConfig};

#[test]
fn test_prerender_with_file_store_round_trips_toggle() {
    let dir = TempDir::new().unwrap();
    let state_path = dir.path().join("toc_state.json");
    let state_path = state_path.to_str().unwrap();
    let html = create_fake_page_html(&FakePageConfig::default());

    let report = prerender(
        &html,
        &TocConfig::default(),
        FileStore::load_or_ephemeral(Some(state_path)),
        1280.0,
        true,
    )
    .unwrap();
    assert!(report.collapsed);

    let store = FileStore::load_or_ephemeral(Some(state_path));
    assert_eq!(store.get(TOC_COLLAPSED_KEY).as_deref(), Some("true"));
    // Prerendering never runs the first-visit timer.
    assert_eq!(store.get(TOC_HINT_SHOWN_KEY), None);

    let report = prerender(&html, &TocConfig::default(), store, 1280.0, false).unwrap();
    assert!(report.collapsed);
    let page = Page::parse(&report.html).unwrap();
    let container = page.find_by_class("toc-article").unwrap();
    assert!(toc_sidebar::page::dom::has_class(&container, "toc-collapsed"));
}

#[test]
fn test_prerender_honours_custom_selectors() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("toc.json");
    fs::write(
        &config_path,
        r#"{"container_class": "sidebar", "list_selector": ".sidebar-list", "link_class": "", "text_class": "label", "collapsed_class": "folded"}"#,
    )
    .unwrap();
    let config = TocConfig::load_or_default(config_path.to_str());
    assert_eq!(config.container_class, "sidebar");

    let html = r##"<html><body>
<div class="sidebar"><ol class="sidebar-list">
  <li><a href="#"><b class="label">Quick Start</b></a></li>
</ol></div>
<h2>Quick Start</h2>
</body></html>"##;

    let report = prerender(html, &config, FileStore::ephemeral(), 1280.0, false).unwrap();
    assert!(report.attached);
    assert!(report.html.contains(r##"href="#quick-start""##));
    assert!(report.html.contains(r#"<h2 id="quick-start">Quick Start</h2>"#));

    let folded = prerender(html, &config, FileStore::ephemeral(), 1280.0, true).unwrap();
    assert!(folded.html.contains(r#"class="sidebar folded""#));

    let default_report =
        prerender(html, &TocConfig::default(), FileStore::ephemeral(), 1280.0, false).unwrap();
    assert!(!default_report.attached);
}

#[test]
fn test_prerendered_button_hidden_on_mobile_width() {
    let html = create_fake_page_html(&FakePageConfig::default());
    let report = prerender(&html, &TocConfig::default(), FileStore::ephemeral(), 500.0, false).unwrap();

    let page = Page::parse(&report.html).unwrap();
    let button = page.find_by_class("toc-toggle-btn").unwrap();
    assert!(toc_sidebar::page::dom::has_class(&button, "hidden"));
}

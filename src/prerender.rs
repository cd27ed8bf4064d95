use crate::config::TocConfig;
use crate::controller::TocController;
use crate::layout::{StaticGeometry, Viewport};
use crate::page::Page;
use crate::storage::KeyValueStore;
use crate::toc::RepairOutcome;
use anyhow::Result;
use log::info;

#[derive(Debug, Clone)]
pub struct PrerenderReport {
    pub html: String,
    /// False when the page had no TOC container; `html` is then the input reserialized.
    pub attached: bool,
    pub collapsed: bool,
    pub repair: RepairOutcome,
}

/// Run controller initialization over a static page and serialize the result.
///
/// With `toggle`, one toggle is performed after initialization, so the
/// persisted state flips exactly as a click on the title would.
pub fn prerender<S: KeyValueStore>(
    html: &str,
    config: &TocConfig,
    store: S,
    viewport_width: f64,
    toggle: bool,
) -> Result<PrerenderReport> {
    let page = Page::parse(html)?;
    let viewport = Viewport::new(viewport_width, Viewport::default().height);

    let Some(mut controller) =
        TocController::init(&page, config.clone(), store, StaticGeometry::new(), viewport)
    else {
        info!("Page has no TOC container; writing it back unchanged");
        return Ok(PrerenderReport {
            html: page.to_html()?,
            attached: false,
            collapsed: false,
            repair: RepairOutcome::default(),
        });
    };

    if toggle {
        controller.toggle();
    }

    let collapsed = controller.is_collapsed();
    let repair = controller.repair_outcome().clone();
    drop(controller);

    Ok(PrerenderReport {
        html: page.to_html()?,
        attached: true,
        collapsed,
        repair,
    })
}

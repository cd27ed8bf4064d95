//! Headings, TOC entries, and the correspondence between them.

pub mod link_repair;

pub use link_repair::{RepairOutcome, repair_links};

use crate::config::TocConfig;
use crate::page::{Handle, Page, dom};

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Class carried by the entry of the heading currently being read.
pub const ACTIVE_CLASS: &str = "active";

/// A document heading outside the TOC.
#[derive(Debug, Clone)]
pub struct Heading {
    pub element: Handle,
    /// Trimmed text content.
    pub label: String,
    /// 1-based position among collected headings.
    pub position: usize,
}

impl Heading {
    pub fn id(&self) -> Option<String> {
        dom::get_attr(&self.element, "id").filter(|id| !id.is_empty())
    }

    pub fn level(&self) -> usize {
        dom::tag_name(&self.element)
            .and_then(|tag| HEADING_TAGS.iter().position(|h| *h == tag))
            .map(|index| index + 1)
            .unwrap_or(1)
    }
}

/// A link inside the TOC list.
#[derive(Debug, Clone)]
pub struct TocEntry {
    pub element: Handle,
    /// Trimmed text of the `.toc-text` sub-element, or of the whole link.
    pub label: String,
}

impl TocEntry {
    pub fn href(&self) -> Option<String> {
        dom::get_attr(&self.element, "href")
    }

    /// Target heading id; `None` when the link has no usable fragment.
    pub fn target(&self) -> Option<String> {
        let href = self.href()?;
        let fragment = href.strip_prefix('#').unwrap_or(&href);
        if fragment.is_empty() {
            None
        } else {
            Some(fragment.to_string())
        }
    }

    pub fn lacks_target(&self) -> bool {
        self.href()
            .map(|href| href.trim().is_empty() || href.trim() == "#")
            .unwrap_or(true)
    }

    pub fn set_target(&self, id: &str) {
        dom::set_attr(&self.element, "href", &format!("#{id}"));
    }

    pub fn is_active(&self) -> bool {
        dom::has_class(&self.element, ACTIVE_CLASS)
    }
}

pub fn is_heading(node: &Handle) -> bool {
    HEADING_TAGS.iter().any(|tag| dom::is_element(node, tag))
}

/// Headings of the page in document order, skipping any inside `container`.
pub fn collect_headings(page: &Page, container: Option<&Handle>) -> Vec<Heading> {
    page.elements()
        .into_iter()
        .filter(is_heading)
        .filter(|node| container.is_none_or(|c| !dom::is_inclusive_descendant(node, c)))
        .enumerate()
        .map(|(index, element)| Heading {
            label: dom::text_content(&element).trim().to_string(),
            element,
            position: index + 1,
        })
        .collect()
}

/// TOC links inside the container's list (or the container itself if it has no list).
pub fn collect_entries(container: &Handle, config: &TocConfig) -> Vec<TocEntry> {
    let list =
        dom::select_first(container, &config.list_selector).unwrap_or_else(|| container.clone());
    dom::descendant_elements(&list)
        .into_iter()
        .filter(|node| dom::is_element(node, "a"))
        .filter(|node| {
            config.link_class.is_empty() || dom::has_class(node, &config.link_class)
        })
        .map(|element| {
            let label_source =
                dom::find_by_class(&element, &config.text_class).unwrap_or_else(|| element.clone());
            TocEntry {
                label: dom::text_content(&label_source).trim().to_string(),
                element,
            }
        })
        .collect()
}

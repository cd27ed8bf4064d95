/// Fake documentation pages for exercising the TOC controller
use crate::layout::StaticGeometry;
use crate::slug::slugify;

/// Configuration for a fake page
#[derive(Debug, Clone)]
pub struct FakePageConfig {
    pub title: String,
    pub sections: Vec<String>,
    /// Render TOC links with `href="#"` so link repair has to fill them in.
    pub unlinked_entries: bool,
    /// Extra TOC entries that match no heading.
    pub orphan_entries: Vec<String>,
    pub include_toc: bool,
}

impl Default for FakePageConfig {
    fn default() -> Self {
        Self {
            title: "Fake Docs".to_string(),
            sections: vec![
                "Intro Section".to_string(),
                "Installation".to_string(),
                "Configuration".to_string(),
                "FAQ".to_string(),
            ],
            unlinked_entries: true,
            orphan_entries: Vec::new(),
            include_toc: true,
        }
    }
}

/// Pixel height reserved for each section in [`stacked_geometry`].
pub const SECTION_HEIGHT: f64 = 1000.0;
pub const HEADING_HEIGHT: f64 = 40.0;

/// Builds the HTML of a static page with an optional TOC sidebar
pub fn create_fake_page_html(config: &FakePageConfig) -> String {
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{}</title></head>\n<body>\n",
        config.title
    );

    if config.include_toc {
        html.push_str("<aside class=\"toc-article\">\n");
        html.push_str("  <div class=\"toc-title\">Contents</div>\n");
        html.push_str("  <ol id=\"toc\">\n");
        let labels = config.sections.iter().chain(config.orphan_entries.iter());
        for (i, label) in labels.enumerate() {
            let href = if config.unlinked_entries {
                "#".to_string()
            } else {
                format!("#{}", slugify(label))
            };
            html.push_str(&format!(
                "    <li><a class=\"toc-link\" href=\"{href}\"><span class=\"toc-num\">{}</span><span class=\"toc-text\">{label}</span></a></li>\n",
                i + 1
            ));
        }
        html.push_str("  </ol>\n</aside>\n");
    }

    html.push_str(&format!("<main>\n<h1 id=\"page-title\">{}</h1>\n", config.title));
    for label in &config.sections {
        html.push_str(&format!(
            "<section>\n<h2>{label}</h2>\n<p>Some words about {label}.</p>\n</section>\n"
        ));
    }
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// Geometry placing section `i` (0-based) at `(i + 1) * SECTION_HEIGHT`.
pub fn stacked_geometry(config: &FakePageConfig) -> StaticGeometry {
    let mut geometry = StaticGeometry::new().with("page-title", 0.0, HEADING_HEIGHT);
    for (i, label) in config.sections.iter().enumerate() {
        geometry = geometry.with(&slugify(label), (i as f64 + 1.0) * SECTION_HEIGHT, HEADING_HEIGHT);
    }
    geometry
}

//! HTML page model.
//!
//! A [`Page`] owns the parsed DOM of a single document. The controller reads
//! and mutates it through the helpers in [`dom`]; [`Page::to_html`] serializes
//! the result back for prerendering.

pub mod dom;

use anyhow::{Context, Result};
use html5ever::parse_document;
use html5ever::serialize::serialize;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{RcDom, SerializableHandle};

pub use markup5ever_rcdom::Handle;

pub struct Page {
    dom: RcDom,
}

impl Page {
    pub fn parse(html: &str) -> Result<Self> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .context("Failed to parse HTML document")?;
        Ok(Self { dom })
    }

    pub fn document(&self) -> &Handle {
        &self.dom.document
    }

    /// The `<body>` element; html5ever always synthesizes one for documents.
    pub fn body(&self) -> Option<Handle> {
        dom::find_by_tag(&self.dom.document, "body")
    }

    /// Where floating widgets get attached: `<body>`, else the root element.
    pub fn mount_point(&self) -> Handle {
        self.body()
            .or_else(|| dom::descendant_elements(&self.dom.document).into_iter().next())
            .unwrap_or_else(|| self.dom.document.clone())
    }

    pub fn find_by_class(&self, class: &str) -> Option<Handle> {
        dom::find_by_class(&self.dom.document, class)
    }

    pub fn find_by_id(&self, id: &str) -> Option<Handle> {
        dom::find_by_id(&self.dom.document, id)
    }

    /// All elements in document order.
    pub fn elements(&self) -> Vec<Handle> {
        dom::descendant_elements(&self.dom.document)
    }

    pub fn to_html(&self) -> Result<String> {
        let mut bytes = Vec::new();
        let document: SerializableHandle = self.dom.document.clone().into();
        serialize(&mut bytes, &document, Default::default())
            .context("Failed to serialize HTML document")?;
        Ok(String::from_utf8(bytes)?)
    }
}

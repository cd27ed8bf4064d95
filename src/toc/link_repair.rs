use super::{Heading, TocEntry};
use crate::page::dom;
use crate::slug::slugify_or;
use log::debug;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    /// Entries that received a target, as `(label, id)`.
    pub repaired: Vec<(String, String)>,
    /// Labels of entries left without a target.
    pub unmatched: Vec<String>,
    /// Ids assigned to headings that had none.
    pub assigned_ids: Vec<String>,
}

/// Give every target-less entry the id of the first heading with the same label.
///
/// Headings without an id get a slug of their label. Slugs are not
/// de-duplicated, so repeated labels end up sharing an id.
pub fn repair_links(headings: &[Heading], entries: &[TocEntry]) -> RepairOutcome {
    let mut outcome = RepairOutcome::default();

    for entry in entries.iter().filter(|e| e.lacks_target()) {
        let Some(heading) = headings.iter().find(|h| h.label == entry.label) else {
            debug!("No heading matches TOC entry {:?}; leaving it unlinked", entry.label);
            outcome.unmatched.push(entry.label.clone());
            continue;
        };

        let id = match heading.id() {
            Some(id) => id,
            None => {
                let id = slugify_or(&heading.label, heading.position);
                dom::set_attr(&heading.element, "id", &id);
                debug!("Assigned id {id:?} to h{} {:?}", heading.level(), heading.label);
                outcome.assigned_ids.push(id.clone());
                id
            }
        };

        entry.set_target(&id);
        outcome.repaired.push((entry.label.clone(), id));
    }

    outcome
}

//! Notes feed.

use crate::model::ids::ContactId;
use crate::model::note::Note;
use crate::store::entity_store::CrmStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow<'a> {
    pub note: &'a Note,
    /// `None` only for notes loaded without their contact, which the store
    /// does not allow; kept optional so rendering never panics.
    pub contact_name: Option<&'a str>,
}

/// Notes newest first, optionally restricted to one contact.
pub fn notes_feed(store: &CrmStore, contact: Option<ContactId>) -> Vec<NoteRow<'_>> {
    let mut rows: Vec<NoteRow<'_>> = store
        .notes()
        .iter()
        .filter(|note| contact.map_or(true, |id| note.contact_id == id))
        .map(|note| NoteRow {
            note,
            contact_name: store
                .get_contact_by_id(note.contact_id)
                .map(|contact| contact.name.as_str()),
        })
        .collect();
    // Stable sort: equal timestamps keep insertion order.
    rows.sort_by(|a, b| b.note.created_at.cmp(&a.note.created_at));
    rows
}

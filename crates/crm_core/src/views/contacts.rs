//! Per-contact activity and contact search.

use crate::model::contact::Contact;
use crate::model::file::CrmFile;
use crate::model::ids::ContactId;
use crate::model::note::Note;
use crate::model::task::Task;
use crate::store::entity_store::CrmStore;

/// Everything that references one contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactActivity<'a> {
    pub contact: &'a Contact,
    pub tasks: Vec<&'a Task>,
    pub notes: Vec<&'a Note>,
    pub files: Vec<&'a CrmFile>,
}

/// Returns `None` when the contact does not exist.
pub fn contact_activity(store: &CrmStore, id: ContactId) -> Option<ContactActivity<'_>> {
    let contact = store.get_contact_by_id(id)?;
    Some(ContactActivity {
        contact,
        tasks: store
            .tasks()
            .iter()
            .filter(|task| task.contact_id == Some(id))
            .collect(),
        notes: store
            .notes()
            .iter()
            .filter(|note| note.contact_id == id)
            .collect(),
        files: store
            .files()
            .iter()
            .filter(|file| file.contact_id == Some(id))
            .collect(),
    })
}

/// Case-insensitive substring match on name, email or company.
///
/// An empty (or whitespace) query returns every contact.
pub fn search_contacts<'a>(store: &'a CrmStore, query: &str) -> Vec<&'a Contact> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return store.contacts().iter().collect();
    }
    store
        .contacts()
        .iter()
        .filter(|contact| {
            [&contact.name, &contact.email, &contact.company]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

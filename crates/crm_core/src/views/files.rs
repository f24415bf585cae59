//! File list rows.

use crate::model::file::CrmFile;
use crate::store::entity_store::CrmStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow<'a> {
    pub file: &'a CrmFile,
    pub contact_name: Option<&'a str>,
}

pub fn file_rows(store: &CrmStore) -> Vec<FileRow<'_>> {
    store
        .files()
        .iter()
        .map(|file| FileRow {
            file,
            contact_name: file
                .contact_id
                .and_then(|id| store.get_contact_by_id(id))
                .map(|contact| contact.name.as_str()),
        })
        .collect()
}

use chrono::{Duration, TimeZone, Utc};
use crm_core::{
    Clock, CrmStore, EntityKind, FixedClock, NewContact, NewFile, NewNote, NewTask, NewUser,
    StoreError, TaskId, TaskStatus,
};
use std::collections::HashSet;
use std::sync::Arc;

fn new_contact(name: &str) -> NewContact {
    NewContact {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "555-0100".to_string(),
        company: "Acme Inc.".to_string(),
        last_contacted: Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap(),
    }
}

fn new_task(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: String::new(),
        due_date: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
        status: TaskStatus::Pending,
        assignee_id: None,
        contact_id: None,
    }
}

#[test]
fn add_then_lookup_returns_input_plus_id() {
    let mut store = CrmStore::new();

    let input = new_contact("Charlie");
    let contact = store.add_contact(input.clone());

    let loaded = store.get_contact_by_id(contact.id).unwrap();
    assert_eq!(loaded, &contact);
    assert_eq!(loaded.name, input.name);
    assert_eq!(loaded.email, input.email);
    assert_eq!(loaded.phone, input.phone);
    assert_eq!(loaded.company, input.company);
    assert_eq!(loaded.last_contacted, input.last_contacted);
}

#[test]
fn add_user_without_avatar_gets_default_and_fresh_id() {
    let mut store = CrmStore::new();
    let existing = store.add_user(NewUser {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        avatar_url: Some("https://img.test/alice.png".to_string()),
    });

    let user = store.add_user(NewUser {
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        avatar_url: None,
    });

    assert!(!user.avatar_url.is_empty());
    assert_ne!(user.id, existing.id);
    assert_eq!(existing.avatar_url, "https://img.test/alice.png");
    assert_eq!(store.get_user_by_id(user.id), Some(&user));
}

#[test]
fn ids_stay_unique_across_many_adds() {
    let mut store = CrmStore::new();
    let ids: HashSet<TaskId> = (0..200)
        .map(|i| store.add_task(new_task(&format!("task {i}"))).id)
        .collect();
    assert_eq!(ids.len(), 200);
    assert_eq!(store.tasks().len(), 200);
}

#[test]
fn collections_keep_insertion_order() {
    let mut store = CrmStore::new();
    let first = store.add_task(new_task("first"));
    let second = store.add_task(new_task("second"));
    let third = store.add_task(new_task("third"));

    store.delete_task(second.id);

    let titles: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "third"]);
    assert_eq!(store.tasks()[0].id, first.id);
    assert_eq!(store.tasks()[1].id, third.id);
}

#[test]
fn update_replaces_only_the_matching_record() {
    let mut store = CrmStore::new();
    let a = store.add_task(new_task("a"));
    let b = store.add_task(new_task("b"));
    let before_b = store.get_task_by_id(b.id).cloned().unwrap();

    let mut edited = a.clone();
    edited.title = "a, edited".to_string();
    edited.status = TaskStatus::Completed;
    store.update_task(edited.clone()).unwrap();

    assert_eq!(store.get_task_by_id(a.id), Some(&edited));
    assert_eq!(store.get_task_by_id(b.id), Some(&before_b));
}

#[test]
fn update_unknown_id_fails_and_changes_nothing() {
    let mut store = CrmStore::new();
    let kept = store.add_task(new_task("kept"));
    let before = store.snapshot();

    let mut ghost = kept.clone();
    ghost.id = TaskId::generate();
    ghost.title = "ghost".to_string();

    let err = store.update_task(ghost.clone()).unwrap_err();
    assert_eq!(
        err,
        StoreError::NotFound {
            kind: EntityKind::Task,
            id: ghost.id.to_string(),
        }
    );
    assert_eq!(store.snapshot(), before);
}

#[test]
fn update_unknown_id_is_rejected_uniformly() {
    let mut store = CrmStore::new();
    let contact = store.add_contact(new_contact("Diana"));
    let user = store.add_user(NewUser {
        name: "Bob".to_string(),
        email: "bob@example.com".to_string(),
        avatar_url: None,
    });
    let note = store.add_note(NewNote {
        content: "hello".to_string(),
        contact_id: contact.id,
    });
    let file = store.add_file(NewFile {
        name: "a.pdf".to_string(),
        kind: "PDF".to_string(),
        size: "1 KB".to_string(),
        contact_id: None,
        data_url: "#".to_string(),
    });
    let task = store.add_task(new_task("orphan"));

    let mut other = CrmStore::new();
    assert!(matches!(
        other.update_task(task),
        Err(StoreError::NotFound { kind: EntityKind::Task, .. })
    ));
    assert!(matches!(
        other.update_user(user),
        Err(StoreError::NotFound { kind: EntityKind::User, .. })
    ));
    assert!(matches!(
        other.update_contact(contact),
        Err(StoreError::NotFound { kind: EntityKind::Contact, .. })
    ));
    assert!(matches!(
        other.update_note(note),
        Err(StoreError::NotFound { kind: EntityKind::Note, .. })
    ));
    assert!(matches!(
        other.update_file(file),
        Err(StoreError::NotFound { kind: EntityKind::File, .. })
    ));
}

#[test]
fn delete_twice_is_a_no_op_the_second_time() {
    let mut store = CrmStore::new();
    let task = store.add_task(new_task("once"));

    assert_eq!(store.delete_task(task.id), Some(task.clone()));
    let after_first = store.snapshot();
    assert_eq!(store.delete_task(task.id), None);
    assert_eq!(store.snapshot(), after_first);
}

#[test]
fn note_created_at_is_store_assigned_and_survives_updates() {
    let start = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
    let clock = Arc::new(FixedClock::new(start));
    let mut store = CrmStore::with_clock(Arc::clone(&clock));
    let contact = store.add_contact(new_contact("Diana"));

    let note = store.add_note(NewNote {
        content: "first draft".to_string(),
        contact_id: contact.id,
    });
    assert_eq!(note.created_at, start);

    clock.advance(Duration::hours(3));

    let mut edited = note.clone();
    edited.content = "second draft".to_string();
    edited.created_at = clock.now();
    store.update_note(edited).unwrap();

    let stored = store.get_note_by_id(note.id).unwrap();
    assert_eq!(stored.content, "second draft");
    assert_eq!(stored.created_at, start);
}

#[test]
fn file_upload_date_is_store_assigned_and_survives_updates() {
    let start = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
    let clock = Arc::new(FixedClock::new(start));
    let mut store = CrmStore::with_clock(Arc::clone(&clock));

    let file = store.add_file(NewFile {
        name: "proposal.pdf".to_string(),
        kind: "PDF".to_string(),
        size: "2.3 MB".to_string(),
        contact_id: None,
        data_url: "#".to_string(),
    });
    assert_eq!(file.upload_date, start);

    clock.advance(Duration::days(1));
    let mut renamed = file.clone();
    renamed.name = "proposal-v2.pdf".to_string();
    renamed.upload_date = start + Duration::days(30);
    store.update_file(renamed).unwrap();

    let stored = store.get_file_by_id(file.id).unwrap();
    assert_eq!(stored.name, "proposal-v2.pdf");
    assert_eq!(stored.upload_date, start);
}

fn new_user(name: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        avatar_url: Some(format!("https://avatars.test/{name}.png")),
    }
}

fn new_file(name: &str) -> NewFile {
    NewFile {
        name: name.to_string(),
        kind: "PDF".to_string(),
        size: "1 KB".to_string(),
        contact_id: None,
        data_url: "#".to_string(),
    }
}

#[test]
fn user_lifecycle_add_get_update_delete() {
    let mut store = CrmStore::new();
    let alice = store.add_user(new_user("Alice"));
    let bob = store.add_user(new_user("Bob"));

    let stored = store.get_user_by_id(alice.id).unwrap();
    assert_eq!(stored.name, "Alice");
    assert_eq!(stored.email, "alice@example.com");
    assert_eq!(stored.avatar_url, "https://avatars.test/Alice.png");
    assert_eq!(stored, &alice);

    let mut renamed = alice.clone();
    renamed.name = "Alice Johnson".to_string();
    store.update_user(renamed.clone()).unwrap();
    assert_eq!(store.get_user_by_id(alice.id), Some(&renamed));
    assert_eq!(store.get_user_by_id(bob.id), Some(&bob));
    assert_eq!(store.users().len(), 2);

    assert_eq!(store.delete_user(alice.id), Some(renamed));
    assert!(store.get_user_by_id(alice.id).is_none());
    let after_first = store.snapshot();
    assert_eq!(store.delete_user(alice.id), None);
    assert_eq!(store.snapshot(), after_first);
    assert_eq!(store.users(), std::slice::from_ref(&bob));
}

#[test]
fn contact_lifecycle_add_get_update_delete() {
    let mut store = CrmStore::new();
    let charlie = store.add_contact(new_contact("Charlie"));
    let diana = store.add_contact(new_contact("Diana"));

    assert_eq!(store.get_contact_by_id(charlie.id), Some(&charlie));

    let mut moved = charlie.clone();
    moved.company = "Stark Industries".to_string();
    moved.phone = "555-0199".to_string();
    store.update_contact(moved.clone()).unwrap();
    assert_eq!(store.get_contact_by_id(charlie.id), Some(&moved));
    assert_eq!(store.get_contact_by_id(diana.id), Some(&diana));

    assert_eq!(store.delete_contact(charlie.id), Some(moved));
    let after_first = store.snapshot();
    assert_eq!(store.delete_contact(charlie.id), None);
    assert_eq!(store.snapshot(), after_first);
    assert_eq!(store.contacts(), std::slice::from_ref(&diana));
}

#[test]
fn note_lifecycle_add_get_update_delete() {
    let start = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
    let mut store = CrmStore::with_clock(FixedClock::new(start));
    let contact = store.add_contact(new_contact("Charlie"));
    let first = store.add_note(NewNote {
        content: "first".to_string(),
        contact_id: contact.id,
    });
    let second = store.add_note(NewNote {
        content: "second".to_string(),
        contact_id: contact.id,
    });

    let stored = store.get_note_by_id(first.id).unwrap();
    assert_eq!(stored.content, "first");
    assert_eq!(stored.contact_id, contact.id);
    assert_eq!(stored.created_at, start);
    assert_eq!(stored, &first);

    let mut edited = first.clone();
    edited.content = "first, edited".to_string();
    store.update_note(edited.clone()).unwrap();
    assert_eq!(store.get_note_by_id(first.id), Some(&edited));
    assert_eq!(store.get_note_by_id(second.id), Some(&second));

    assert_eq!(store.delete_note(first.id), Some(edited));
    let after_first = store.snapshot();
    assert_eq!(store.delete_note(first.id), None);
    assert_eq!(store.snapshot(), after_first);
    assert_eq!(store.notes(), std::slice::from_ref(&second));
    assert!(store.get_contact_by_id(contact.id).is_some());
}

#[test]
fn file_lifecycle_add_get_update_delete() {
    let start = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
    let mut store = CrmStore::with_clock(FixedClock::new(start));
    let proposal = store.add_file(new_file("proposal.pdf"));
    let invoice = store.add_file(new_file("invoice.pdf"));

    let stored = store.get_file_by_id(proposal.id).unwrap();
    assert_eq!(stored.name, "proposal.pdf");
    assert_eq!(stored.kind, "PDF");
    assert_eq!(stored.size, "1 KB");
    assert_eq!(stored.data_url, "#");
    assert_eq!(stored.upload_date, start);
    assert_eq!(stored, &proposal);

    let mut renamed = proposal.clone();
    renamed.name = "proposal-final.pdf".to_string();
    store.update_file(renamed.clone()).unwrap();
    assert_eq!(store.get_file_by_id(proposal.id), Some(&renamed));
    assert_eq!(store.get_file_by_id(invoice.id), Some(&invoice));

    assert_eq!(store.delete_file(proposal.id), Some(renamed));
    let after_first = store.snapshot();
    assert_eq!(store.delete_file(proposal.id), None);
    assert_eq!(store.snapshot(), after_first);
    assert_eq!(store.files(), std::slice::from_ref(&invoice));
}

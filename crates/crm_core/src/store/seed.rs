//! Demo data set.
//!
//! Mirrors the sample workspace a fresh dashboard starts with: two users,
//! two contacts, three tasks, one note and one file. Dates are relative to
//! the clock so "overdue" and "upcoming" stay meaningful.

use super::clock::{Clock, SystemClock};
use super::entity_store::{CrmSnapshot, CrmStore, StoreResult};
use crate::model::contact::Contact;
use crate::model::file::CrmFile;
use crate::model::ids::{ContactId, FileId, NoteId, TaskId, UserId};
use crate::model::note::Note;
use crate::model::task::{Task, TaskStatus};
use crate::model::user::User;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

pub const ALICE: UserId = UserId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_00a1));
pub const BOB: UserId = UserId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_00b2));
pub const CHARLIE: ContactId =
    ContactId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_00c1));
pub const DIANA: ContactId =
    ContactId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_00c2));

const FOLLOW_UP: TaskId = TaskId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0071));
const PRESENTATION: TaskId =
    TaskId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0072));
const INVOICE: TaskId = TaskId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0073));
const CHARLIE_NOTE: NoteId = NoteId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0091));
const PROPOSAL: FileId = FileId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_00f1));

/// Builds the demo snapshot anchored at `now`.
pub fn demo_snapshot(now: DateTime<Utc>) -> CrmSnapshot {
    let days = Duration::days;

    CrmSnapshot {
        users: vec![
            User {
                id: ALICE,
                name: "Alice Johnson".to_string(),
                email: "alice@example.com".to_string(),
                avatar_url: "https://picsum.photos/seed/alice/40/40".to_string(),
            },
            User {
                id: BOB,
                name: "Bob Williams".to_string(),
                email: "bob@example.com".to_string(),
                avatar_url: "https://picsum.photos/seed/bob/40/40".to_string(),
            },
        ],
        contacts: vec![
            Contact {
                id: CHARLIE,
                name: "Charlie Brown".to_string(),
                email: "charlie@acme.com".to_string(),
                phone: "123-456-7890".to_string(),
                company: "Acme Inc.".to_string(),
                last_contacted: now - days(3),
            },
            Contact {
                id: DIANA,
                name: "Diana Prince".to_string(),
                email: "diana@stark.com".to_string(),
                phone: "098-765-4321".to_string(),
                company: "Stark Industries".to_string(),
                last_contacted: now - days(10),
            },
        ],
        tasks: vec![
            Task {
                id: FOLLOW_UP,
                title: "Follow up with Charlie".to_string(),
                description: "Discuss the new proposal with Charlie Brown.".to_string(),
                due_date: now + days(2),
                status: TaskStatus::Pending,
                assignee_id: Some(ALICE),
                contact_id: Some(CHARLIE),
            },
            Task {
                id: PRESENTATION,
                title: "Prepare presentation for Stark".to_string(),
                description: "Finalize the presentation for the meeting with Stark Industries."
                    .to_string(),
                due_date: now + days(5),
                status: TaskStatus::InProgress,
                assignee_id: Some(BOB),
                contact_id: Some(DIANA),
            },
            Task {
                id: INVOICE,
                title: "Send invoice to Acme".to_string(),
                description: "Generate and send the quarterly invoice.".to_string(),
                due_date: now - days(1),
                status: TaskStatus::Completed,
                assignee_id: Some(ALICE),
                contact_id: Some(CHARLIE),
            },
        ],
        notes: vec![Note {
            id: CHARLIE_NOTE,
            content: "Charlie is interested in our new product line. Mentioned budget concerns."
                .to_string(),
            contact_id: CHARLIE,
            created_at: now,
        }],
        files: vec![CrmFile {
            id: PROPOSAL,
            name: "Acme_Proposal_v2.pdf".to_string(),
            kind: "PDF".to_string(),
            size: "2.3 MB".to_string(),
            upload_date: now,
            contact_id: Some(CHARLIE),
            data_url: "#".to_string(),
        }],
    }
}

/// Demo store on the wall clock.
pub fn demo_store() -> StoreResult<CrmStore> {
    demo_store_with_clock(SystemClock)
}

/// Demo store whose dates are anchored at `clock.now()`.
pub fn demo_store_with_clock(clock: impl Clock + 'static) -> StoreResult<CrmStore> {
    let snapshot = demo_snapshot(clock.now());
    CrmStore::from_snapshot(snapshot, clock)
}

//! Shared fixture records for the integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use fieldkit::{Record, ValueMap};

#[derive(Record, Debug, Default, Clone, PartialEq)]
pub struct Audit {
    #[record(tag(json = "createdBy,omitempty", db = "created_by"))]
    pub created_by: String,
    #[record(tag(json = "createdAt"))]
    pub created_at: NaiveDateTime,
    revision: u32,
}

impl Audit {
    pub fn revision(&self) -> u32 {
        self.revision
    }
}

#[derive(Record, Debug, Default, Clone, PartialEq)]
#[record(methods(display_name, validate))]
pub struct Account {
    #[record(tag(json = "id", db = "account_id"))]
    pub id: i64,
    #[record(tag(json = "name,omitempty"))]
    pub name: String,
    #[record(tag(json = "age"))]
    pub age: i32,
    pub quota: u32,
    pub login_time: String,
    pub session_id: String,
    pub avatar: Vec<u8>,
    pub token: [u8; 16],
    pub settings: ValueMap,
    pub ratio: f64,
    pub active: bool,
    #[record(embed)]
    pub audit: Audit,
    password_hash: String,
}

impl Account {
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }

    pub fn validate(&self) -> bool {
        !self.name.is_empty() && !self.password_hash.is_empty()
    }

    pub fn with_password(mut self, hash: &str) -> Self {
        self.password_hash = hash.to_owned();
        self
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

/// Carries an embedded record that is not exported.
#[derive(Record, Debug, Default)]
#[record(methods(seal))]
pub struct Envelope {
    #[record(tag(json = "subject"))]
    pub subject: String,
    #[record(embed)]
    meta: Audit,
}

impl Envelope {
    pub fn seal(&mut self) {
        self.meta.revision += 1;
    }
}

/// Two levels of embedding.
#[derive(Record, Debug, Default)]
pub struct Ledger {
    pub title: String,
    #[record(embed)]
    pub account: Account,
}

pub fn sample_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .and_then(|d| d.and_hms_opt(7, 8, 9))
        .expect("valid sample time")
}

pub fn sample_account() -> Account {
    Account {
        id: 7,
        name: "ada".into(),
        age: 36,
        quota: 10,
        active: true,
        audit: Audit {
            created_by: "root".into(),
            created_at: sample_time(),
            revision: 2,
        },
        ..Account::default()
    }
    .with_password("x1")
}

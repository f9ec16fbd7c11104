//! People involved in cases: clients, judges, witnesses.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonType {
    Client,
    Defendant,
    Judge,
    Lawyer,
    Witness,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub full_name: String,
    pub person_type: PersonType,
    #[serde(default)]
    pub idnp: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub phone_additional: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address_legal: Option<String>,
    #[serde(default)]
    pub address_actual: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub idno: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "super::timestamp")]
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPerson {
    pub full_name: String,
    pub person_type: PersonType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idnp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idno: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewPerson {
    pub fn new(full_name: impl Into<String>, person_type: PersonType) -> Self {
        Self {
            full_name: full_name.into(),
            person_type,
            idnp: None,
            birth_date: None,
            phone: None,
            email: None,
            organization: None,
            idno: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_type: Option<PersonType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Cases a person takes part in, with their role in each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonCases {
    pub person_id: i64,
    pub full_name: String,
    #[serde(default)]
    pub cases: Vec<PersonCase>,
    #[serde(default)]
    pub total_cases: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonCase {
    pub case_id: i64,
    pub case_number: String,
    pub title: String,
    pub case_type: super::CaseType,
    pub case_status: super::CaseStatus,
    #[serde(default)]
    pub open_date: Option<NaiveDate>,
    #[serde(default)]
    pub close_date: Option<NaiveDate>,
    #[serde(default)]
    pub role_in_case: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

//! DOCX templates used to generate case documents.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::gateway::{FilePart, Multipart};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub template_name: String,
    pub template_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub variables: BTreeMap<String, Value>,
    pub file_path: String,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "super::timestamp")]
    pub updated_at: NaiveDateTime,
}

/// The template listing is not paginated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateList {
    pub items: Vec<Template>,
    pub total: u64,
}

#[derive(Debug, Clone)]
pub struct TemplateUpload {
    pub file: FilePart,
    pub template_name: String,
    pub template_type: String,
    pub description: Option<String>,
}

impl TemplateUpload {
    pub fn new(
        file: FilePart,
        template_name: impl Into<String>,
        template_type: impl Into<String>,
    ) -> Self {
        Self {
            file,
            template_name: template_name.into(),
            template_type: template_type.into(),
            description: None,
        }
    }

    pub(crate) fn into_multipart(self) -> Multipart {
        let mut form = Multipart::new()
            .file(self.file)
            .text("template_name", self.template_name)
            .text("template_type", self.template_type);
        if let Some(description) = self.description {
            form = form.text("description", description);
        }
        form
    }
}

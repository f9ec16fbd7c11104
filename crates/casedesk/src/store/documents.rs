use std::ops::{Deref, DerefMut};

use crate::api::{Documents, Resources};
use crate::error::Error;
use crate::gateway::Gateway;
use crate::models::{Document, DocumentUpload, OcrResult};

use super::resource::ResourceStore;

/// Document list and detail, with upload and OCR.
#[derive(Debug)]
pub struct DocumentsStore {
    documents: ResourceStore<Documents>,
}

impl DocumentsStore {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            documents: ResourceStore::new(gateway),
        }
    }

    /// Upload a file and put the new document at the top of the list.
    pub async fn upload(&mut self, upload: DocumentUpload) -> Result<Document, Error> {
        let store = &mut self.documents;
        let document = store
            .state
            .track(
                "Failed to upload file",
                Resources::<Documents>::new(&store.gateway).upload(upload),
            )
            .await?;
        store.prepend(document.clone());
        Ok(document)
    }

    /// Run OCR on a document. The current document picks up the text.
    pub async fn run_ocr(&mut self, id: i64) -> Result<OcrResult, Error> {
        let store = &mut self.documents;
        let result = store
            .state
            .track(
                "OCR failed",
                Resources::<Documents>::new(&store.gateway).run_ocr(id),
            )
            .await?;

        if let Some(current) = store.current.as_mut().filter(|d| d.id == id) {
            current.ocr_text = Some(result.ocr_text.clone());
        }
        Ok(result)
    }

    pub fn download_url(&self, id: i64) -> String {
        Resources::<Documents>::new(&self.documents.gateway).download_url(id)
    }

    pub fn preview_url(&self, id: i64) -> String {
        Resources::<Documents>::new(&self.documents.gateway).preview_url(id)
    }
}

impl Deref for DocumentsStore {
    type Target = ResourceStore<Documents>;

    fn deref(&self) -> &Self::Target {
        &self.documents
    }
}

impl DerefMut for DocumentsStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.documents
    }
}

//! Document commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use casedesk::Client;
use casedesk::gateway::FilePart;
use casedesk::models::{Document, DocumentType, DocumentUpload};

use super::{PageArgs, parse_enum, store_message};
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct DocumentsCommand {
    #[command(subcommand)]
    pub command: DocumentsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DocumentsSubcommand {
    /// List documents
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Only documents attached to this case
        #[arg(long)]
        case_id: Option<i64>,

        /// Only documents of this type (e.g. lawsuit)
        #[arg(long = "type")]
        document_type: Option<String>,
    },

    /// Show one document
    Get {
        id: i64,

        /// Print the document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Upload a file
    Upload(UploadArgs),

    /// Run text recognition on a document
    Ocr { id: i64 },

    /// Download a document's file
    Download {
        id: i64,

        /// Where to write the file (defaults to the server's file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// File to upload
    pub file: PathBuf,

    /// Document type (e.g. lawsuit, contract)
    #[arg(long = "type", default_value = "other")]
    pub document_type: String,

    /// Attach to this case
    #[arg(long)]
    pub case_id: Option<i64>,

    /// Short description
    #[arg(long)]
    pub description: Option<String>,

    /// Tag, repeatable
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Skip text recognition after upload
    #[arg(long)]
    pub no_ocr: bool,
}

pub async fn handle(cmd: DocumentsCommand, client: &Client) -> Result<()> {
    session::require(client)?;
    let mut store = client.documents_store();

    match cmd.command {
        DocumentsSubcommand::List {
            page,
            case_id,
            document_type,
        } => {
            let mut params = page.params();
            if let Some(case_id) = case_id {
                params = params.filter("case_id", case_id.to_string());
            }
            if let Some(document_type) = document_type {
                let document_type: DocumentType = parse_enum(&document_type, "document type")?;
                params = params.filter("document_type", document_type.as_str());
            }

            let result = store.fetch(params).await;
            let listing =
                result.context(store_message(store.error(), "Failed to load documents"))?;

            if page.json {
                return output::json_pretty(&listing);
            }
            if listing.items.is_empty() {
                output::note("No documents found.");
                return Ok(());
            }
            for document in &listing.items {
                print_row(document);
            }
            output::page_footer(listing.page, listing.pages, listing.total);
        }
        DocumentsSubcommand::Get { id, json } => {
            let result = store.fetch_one(id).await;
            let document =
                result.context(store_message(store.error(), "Failed to load document"))?;

            if json {
                return output::json_pretty(&document);
            }
            print_detail(&document);
            output::field("Download", &store.download_url(id));
        }
        DocumentsSubcommand::Upload(args) => {
            let upload = build_upload(args)?;

            eprintln!("{}", "Uploading...".dimmed());
            let result = store.upload(upload).await;
            let document =
                result.context(store_message(store.error(), "Failed to upload file"))?;

            output::success(&format!("Uploaded document {}", document.id));
            print_detail(&document);
        }
        DocumentsSubcommand::Ocr { id } => {
            eprintln!("{}", "Running OCR...".dimmed());
            let result = store.run_ocr(id).await;
            let ocr = result.context(store_message(store.error(), "OCR failed"))?;

            if !ocr.success {
                output::warning("The backend reported OCR as unsuccessful");
            }
            println!("{}", ocr.ocr_text);
        }
        DocumentsSubcommand::Download { id, output: target } => {
            let download = client
                .api()
                .documents()
                .download(id)
                .await
                .context("Failed to download document")?;

            let target = target
                .or_else(|| download.file_name.as_deref().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(format!("document_{}", id)));

            fs::write(&target, &download.bytes)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            output::success(&format!(
                "Saved {} bytes to {}",
                download.bytes.len(),
                target.display()
            ));
        }
    }

    Ok(())
}

fn build_upload(args: UploadArgs) -> Result<DocumentUpload> {
    let document_type: DocumentType = parse_enum(&args.document_type, "document type")?;
    let bytes =
        fs::read(&args.file).with_context(|| format!("Failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .context("File name is not valid UTF-8")?
        .to_string();

    let file = FilePart::new("file", file_name, mime_for(&args.file), bytes);
    let mut upload = DocumentUpload::new(file, document_type);
    upload.case_id = args.case_id;
    upload.description = args.description;
    upload.tags = args.tags;
    upload.auto_ocr = !args.no_ocr;
    Ok(upload)
}

/// Content type for the formats the backend accepts.
fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("tif" | "tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

fn print_row(document: &Document) {
    let case = document
        .case_id
        .map(|id| format!("case {}", id))
        .unwrap_or_default();
    println!(
        "{:>5}  {:<18} {:<10} {}",
        document.id.to_string().dimmed(),
        document.document_type.as_str().cyan(),
        case,
        document.original_file_name
    );
}

fn print_detail(document: &Document) {
    output::field("File", &document.original_file_name);
    output::field("Type", document.document_type.as_str());
    output::optional_field("Case", document.case_id.map(|id| id.to_string()).as_deref());
    output::optional_field("Description", document.description.as_deref());
    output::optional_field("Format", document.file_format.as_deref());
    output::optional_field("Size", document.file_size.map(|s| s.to_string()).as_deref());
    output::field("Uploaded", &document.upload_date.to_string());
    output::field("Version", &document.version.to_string());
    output::field(
        "OCR",
        if document.ocr_text.is_some() {
            "available"
        } else {
            "none"
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for(Path::new("claim.PDF")), "application/pdf");
        assert_eq!(mime_for(Path::new("scan.tiff")), "image/tiff");
        assert_eq!(mime_for(Path::new("notes")), "application/octet-stream");
    }

    #[test]
    fn upload_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claim.pdf");
        fs::write(&path, b"%PDF-1.4").unwrap();

        let upload = build_upload(UploadArgs {
            file: path,
            document_type: "lawsuit".to_string(),
            case_id: Some(3),
            description: None,
            tags: vec!["urgent".to_string()],
            no_ocr: true,
        })
        .unwrap();

        assert_eq!(upload.document_type, DocumentType::Lawsuit);
        assert_eq!(upload.case_id, Some(3));
        assert!(!upload.auto_ocr);
        assert_eq!(upload.tags, vec!["urgent".to_string()]);
    }
}

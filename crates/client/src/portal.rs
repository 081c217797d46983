//! Portal operations that do not fit the JSON CRUD shape: multipart
//! uploads, the dashboard summary and ASN document links.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use tradedesk_core::{Record, RecordId};
use tradedesk_portal::{Agreement, AsnFile, DashboardSummary};

use crate::endpoint::endpoints;
use crate::error::ApiError;
use crate::http::{decode_record, ApiClient};

/// Multipart field the ASN upload endpoint reads the document from.
pub const ASN_UPLOAD_FIELD: &str = "asnFile";
/// Multipart field carrying an agreement's signed document.
pub const AGREEMENT_FILE_FIELD: &str = "file";

/// A file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = guess_mime(&file_name).to_string();
        Self {
            file_name,
            bytes,
            mime,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = std::fs::read(path)
            .map_err(|e| ApiError::Validation(tradedesk_core::DomainError::validation(format!(
                "cannot read {}: {e}",
                path.display()
            ))))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    fn into_part(self) -> Result<Part, ApiError> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

fn guess_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone)]
pub struct PortalService {
    client: ApiClient,
}

impl PortalService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        self.client
            .get_json(
                &endpoints::DASHBOARD_SUMMARY,
                endpoints::DASHBOARD_SUMMARY.path,
                None,
                &[],
            )
            .await
    }

    fn agreement_form(agreement: &Agreement, file: Option<Attachment>) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (name, value) in agreement.form_parts() {
            form = form.text(name, value);
        }
        if let Some(file) = file {
            form = form.part(AGREEMENT_FILE_FIELD, file.into_part()?);
        }
        Ok(form)
    }

    pub async fn create_agreement(
        &self,
        agreement: &Agreement,
        file: Option<Attachment>,
    ) -> Result<Option<Agreement>, ApiError> {
        agreement.validate()?;
        let form = Self::agreement_form(agreement, file)?;
        let value = self
            .client
            .send_multipart(
                Method::POST,
                &endpoints::AGREEMENTS,
                endpoints::AGREEMENTS.path,
                None,
                form,
            )
            .await?;
        tracing::info!("Created agreement {}", agreement.agreement_number);
        Ok(decode_record(value))
    }

    pub async fn update_agreement(
        &self,
        id: &RecordId,
        agreement: &Agreement,
        file: Option<Attachment>,
    ) -> Result<Option<Agreement>, ApiError> {
        agreement.validate()?;
        let form = Self::agreement_form(agreement, file)?;
        let value = self
            .client
            .send_multipart(
                Method::PUT,
                &endpoints::AGREEMENTS,
                endpoints::AGREEMENTS.path,
                Some(id.as_str()),
                form,
            )
            .await?;
        tracing::info!("Updated agreement {}", id);
        Ok(decode_record(value))
    }

    /// Upload an ASN document; returns the stored file entry when echoed.
    pub async fn upload_asn(&self, file: Attachment) -> Result<Option<AsnFile>, ApiError> {
        let name = file.file_name.clone();
        let form = Form::new().part(ASN_UPLOAD_FIELD, file.into_part()?);
        let value = self
            .client
            .send_multipart(
                Method::POST,
                &endpoints::ASN_UPLOAD,
                endpoints::ASN_UPLOAD.path,
                None,
                form,
            )
            .await?;
        tracing::info!("Uploaded ASN document {}", name);
        Ok(decode_record(value))
    }

    pub async fn asn_files(&self) -> Result<Vec<AsnFile>, ApiError> {
        let files: Vec<AsnFile> = self
            .client
            .get_json(
                &endpoints::ASN_FILES,
                endpoints::ASN_FILES.collection_path(),
                None,
                &[],
            )
            .await?;
        tracing::info!("Fetched {} ASN documents", files.len());
        Ok(files)
    }

    /// Public link of an uploaded ASN document (opened for printing).
    pub fn asn_file_url(&self, file: &AsnFile) -> Result<reqwest::Url, ApiError> {
        let root = self.client.config().uploads_url.trim_end_matches('/');
        let raw = format!("{root}/asn");
        let mut url =
            reqwest::Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(raw.clone()))?
            .push(&file.filename);
        Ok(url)
    }
}

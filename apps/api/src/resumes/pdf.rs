use bytes::Bytes;

use crate::errors::AppError;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Accepts `application/pdf`, ignoring parameters and case.
pub fn is_pdf_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
        .unwrap_or(false)
}

pub fn has_pdf_header(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Extracts plain text from a PDF on the blocking pool.
pub async fn extract_text(pdf: Bytes) -> Result<String, AppError> {
    if !has_pdf_header(&pdf) {
        return Err(AppError::Pdf("missing %PDF- header".to_string()));
    }

    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| AppError::Internal(anyhow::Error::from(e)))?
        .map_err(|e| AppError::Pdf(e.to_string()))
}

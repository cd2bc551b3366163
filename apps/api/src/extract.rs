//! Resume file text extraction for the upload endpoint.
//!
//! PDF goes through `pdf-extract`; anything else is decoded as UTF-8 with
//! invalid sequences replaced, so a plain-text resume never hard-fails.

use anyhow::Result;
use bytes::Bytes;

pub fn extract_text(filename: &str, data: &Bytes) -> Result<String> {
    if is_pdf(filename) {
        return pdf_extract::extract_text_from_mem(data)
            .map_err(|e| anyhow::anyhow!("PDF extraction failed: {e}"));
    }
    Ok(String::from_utf8_lossy(data).into_owned())
}

fn is_pdf(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        let data = Bytes::from_static(b"seven years of backend experience");
        let text = extract_text("resume.txt", &data).unwrap();
        assert_eq!(text, "seven years of backend experience");
    }

    #[test]
    fn test_unknown_extension_decodes_lossy() {
        let data = Bytes::from(vec![b'o', b'k', 0xFF, b'!']);
        let text = extract_text("resume.bin", &data).unwrap();
        assert_eq!(text, "ok\u{FFFD}!");
    }

    #[test]
    fn test_pdf_detection_is_case_insensitive() {
        assert!(is_pdf("resume.PDF"));
        assert!(is_pdf("cv.pdf"));
        assert!(!is_pdf("resume.docx"));
        assert!(!is_pdf("pdf"));
    }
}

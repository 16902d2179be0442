// src/utils.rs

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

pub fn has_pdf_extension(filename: &str) -> bool {
    get_file_extension(filename).as_deref() == Some("pdf")
}

/// Last path component of a client-supplied filename, with either separator
pub fn upload_display_name(raw: &str) -> Option<String> {
    raw.rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("resume.PDF"), Some("pdf".to_string()));
        assert_eq!(get_file_extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_has_pdf_extension() {
        assert!(has_pdf_extension("jane_doe_cv.pdf"));
        assert!(has_pdf_extension("JANE_DOE_CV.PDF"));
        assert!(!has_pdf_extension("jane_doe_cv.docx"));
        assert!(!has_pdf_extension("pdf"));
    }

    #[test]
    fn test_upload_display_name() {
        assert_eq!(
            upload_display_name(r"C:\Users\jane\Documents\cv.pdf"),
            Some("cv.pdf".to_string())
        );
        assert_eq!(upload_display_name("../../cv.pdf"), Some("cv.pdf".to_string()));
        assert_eq!(upload_display_name("folder/"), None);
    }
}

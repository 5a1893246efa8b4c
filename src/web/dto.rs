//! Response DTOs for the HTTP surface.
//!
//! Size and space figures are strings in mebibytes with two decimals, per
//! the wire contract; clients parse them as text, not numbers.

use serde::Serialize;

/// Response body for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Sanitized file name the payload was stored under.
    pub filename: String,
    /// Full path of the stored file.
    pub path: String,
    /// URL path for downloading the file.
    pub download_url: String,
    /// Free space on the volume before the write, e.g. "12.34 MB".
    pub free_space: String,
    /// Stored payload size, e.g. "1.00 MB".
    pub file_size: String,
}

/// One entry in the file listing.
#[derive(Debug, Serialize)]
pub struct FileEntryResponse {
    /// Base name of the file.
    pub name: String,
    /// Size, e.g. "1.00 MB".
    pub size: String,
    /// Last-modified timestamp, RFC3339.
    pub created: String,
    /// URL path for downloading the file.
    pub download_url: String,
}

/// Response body for the file listing.
#[derive(Debug, Serialize)]
pub struct ListFilesResponse {
    /// Files in directory-enumeration order.
    pub files: Vec<FileEntryResponse>,
    /// Sum of listed file sizes, bare MB figure, e.g. "1.50".
    pub storage_used_mb: String,
    /// Volume capacity, bare MB figure.
    pub storage_total_mb: String,
    /// Volume free space, bare MB figure.
    pub storage_free_mb: String,
    /// Number of listed files.
    pub file_count: usize,
}

/// Response body for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Sanitized name of the removed file.
    pub filename: String,
}

/// Build the download URL for a stored file name.
pub fn download_url(name: &str) -> String {
    format!("/download/{}", urlencoding::encode(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_url_plain() {
        assert_eq!(download_url("report.pdf"), "/download/report.pdf");
    }

    #[test]
    fn test_download_url_escapes_spaces() {
        assert_eq!(download_url("my report.pdf"), "/download/my%20report.pdf");
    }

    #[test]
    fn test_download_url_escapes_unicode() {
        let url = download_url("日本語.txt");
        assert!(url.starts_with("/download/%E6%97%A5"));
    }

    #[test]
    fn test_upload_response_serializes_all_fields() {
        let response = UploadResponse {
            message: "File uploaded successfully".to_string(),
            filename: "a.txt".to_string(),
            path: "/data/uploads/a.txt".to_string(),
            download_url: "/download/a.txt".to_string(),
            free_space: "100.00 MB".to_string(),
            file_size: "0.01 MB".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["filename"], "a.txt");
        assert_eq!(json["download_url"], "/download/a.txt");
        assert_eq!(json["free_space"], "100.00 MB");
        assert_eq!(json["file_size"], "0.01 MB");
    }

    #[test]
    fn test_list_response_empty_files_is_array() {
        let response = ListFilesResponse {
            files: vec![],
            storage_used_mb: "0.00".to_string(),
            storage_total_mb: "1000.00".to_string(),
            storage_free_mb: "900.00".to_string(),
            file_count: 0,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["files"].is_array());
        assert_eq!(json["file_count"], 0);
    }
}

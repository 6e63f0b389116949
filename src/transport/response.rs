//! Download payloads handed to the boundary

use serde::Serialize;

use crate::generation::GeneratorFailure;

pub const CONTENT_TYPE: &str = "application/x-msdownload";

/// A generated and packaged scaffold
#[derive(Debug)]
pub struct GeneratedArchive {
    /// Canonical download name
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Generated files, relative to the output root
    pub files: Vec<String>,
    /// Generators whose output is missing from the archive
    pub failures: Vec<GeneratorFailure>,
}

impl GeneratedArchive {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Archive bytes wrapped with transport headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadResponse {
    pub file_name: String,
    pub content_type: String,
    pub headers: Vec<(String, String)>,
    #[serde(skip)]
    pub body: Vec<u8>,
}

impl DownloadResponse {
    pub fn attachment(file_name: impl Into<String>, body: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let headers = vec![
            (
                "Cache-Control".to_string(),
                "no-cache, no-store, must-revalidate".to_string(),
            ),
            ("Pragma".to_string(), "no-cache".to_string()),
            ("Expires".to_string(), "0".to_string()),
            ("charset".to_string(), "utf-8".to_string()),
            (
                "Content-Disposition".to_string(),
                format!("attachment;filename=\"{file_name}\""),
            ),
        ];

        Self {
            file_name,
            content_type: CONTENT_TYPE.to_string(),
            headers,
            body,
        }
    }

    /// First header value with a case-insensitively matching name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

//! Request handling for the user JSON import/export pages, independent of
//! any web framework.

use crate::domain::ports::UserImportExportService;
use crate::utils::error::Result;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const EXPORT_FILE_NAME: &str = "all_users.json";

/// A file posted by the import form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Body and headers of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonDownload {
    pub file_name: String,
    pub body: Vec<u8>,
}

impl JsonDownload {
    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE_JSON
    }

    pub fn content_disposition(&self) -> String {
        format!("inline; filename=\"{}\"", self.file_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportResponse {
    Download(JsonDownload),
    NotFound,
}

/// Flash message shown after an import attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportMessage {
    NoFileGiven,
    NoJsonFile,
    Saved(usize),
    Failed(String),
}

impl ImportMessage {
    pub fn code(&self) -> &'static str {
        match self {
            ImportMessage::NoFileGiven => "user.importexport.upload.msg.noFileGiven",
            ImportMessage::NoJsonFile => "user.importexport.upload.msg.noJsonFile",
            ImportMessage::Saved(_) => "user.importexport.upload.msg.saved",
            ImportMessage::Failed(_) => "user.importexport.upload.msg.failed",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, ImportMessage::Saved(_))
    }
}

pub struct UserImportExportController<S: UserImportExportService> {
    service: S,
}

impl<S: UserImportExportService> UserImportExportController<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Store failures propagate; only an empty export is `NotFound`.
    pub fn export_users(&self) -> Result<ExportResponse> {
        let json = self.service.export_all_users_to_json().map_err(|e| {
            tracing::error!("User export failed: {}", e);
            e
        })?;

        if json.trim().is_empty() {
            return Ok(ExportResponse::NotFound);
        }

        Ok(ExportResponse::Download(JsonDownload {
            file_name: EXPORT_FILE_NAME.to_string(),
            body: json.into_bytes(),
        }))
    }

    pub fn upload_json_file(&self, upload: Option<UploadedFile>) -> ImportMessage {
        let Some(file) = upload.filter(|f| !f.bytes.is_empty()) else {
            return ImportMessage::NoFileGiven;
        };

        if file.content_type.as_deref() != Some(CONTENT_TYPE_JSON) {
            return ImportMessage::NoJsonFile;
        }

        let json = match String::from_utf8(file.bytes) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Uploaded user file is not UTF-8: {}", e);
                return ImportMessage::Failed(e.to_string());
            }
        };

        match self.service.import_users(&json) {
            Ok(count) => ImportMessage::Saved(count),
            Err(e) => {
                tracing::error!("User import failed: {}", e);
                ImportMessage::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FredbetError;

    struct FixedService {
        export: String,
    }

    impl UserImportExportService for FixedService {
        fn export_all_users_to_json(&self) -> Result<String> {
            if self.export == "<unreadable>" {
                return Err(FredbetError::file_read_write(
                    "users.json",
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                ));
            }
            Ok(self.export.clone())
        }

        fn import_users(&self, json: &str) -> Result<usize> {
            if json.starts_with('[') {
                Ok(3)
            } else {
                Err(FredbetError::Import {
                    message: "expected a JSON array".to_string(),
                })
            }
        }
    }

    fn controller(export: &str) -> UserImportExportController<FixedService> {
        UserImportExportController::new(FixedService {
            export: export.to_string(),
        })
    }

    fn json_upload(body: &str) -> Option<UploadedFile> {
        Some(UploadedFile {
            content_type: Some(CONTENT_TYPE_JSON.to_string()),
            bytes: body.as_bytes().to_vec(),
        })
    }

    #[test]
    fn test_export_blank_is_not_found() {
        assert_eq!(
            controller("  ").export_users().unwrap(),
            ExportResponse::NotFound
        );
    }

    #[test]
    fn test_export_store_failure_is_propagated() {
        assert!(matches!(
            controller("<unreadable>").export_users(),
            Err(FredbetError::ReadWrite { .. })
        ));
    }

    #[test]
    fn test_export_headers() {
        let ExportResponse::Download(download) = controller("[]").export_users().unwrap() else {
            panic!("expected a download");
        };
        assert_eq!(download.body, b"[]");
        assert_eq!(download.content_type(), "application/json");
        assert_eq!(
            download.content_disposition(),
            "inline; filename=\"all_users.json\""
        );
    }

    #[test]
    fn test_missing_or_empty_upload() {
        let controller = controller("");
        assert_eq!(controller.upload_json_file(None), ImportMessage::NoFileGiven);
        assert_eq!(
            controller.upload_json_file(json_upload("")),
            ImportMessage::NoFileGiven
        );
    }

    #[test]
    fn test_wrong_content_type() {
        let upload = Some(UploadedFile {
            content_type: Some("text/plain".to_string()),
            bytes: b"[]".to_vec(),
        });
        let message = controller("").upload_json_file(upload);
        assert_eq!(message, ImportMessage::NoJsonFile);
        assert_eq!(message.code(), "user.importexport.upload.msg.noJsonFile");
    }

    #[test]
    fn test_successful_import() {
        let message = controller("").upload_json_file(json_upload("[{}]"));
        assert_eq!(message, ImportMessage::Saved(3));
        assert!(!message.is_error());
    }

    #[test]
    fn test_service_failure_becomes_message() {
        let message = controller("").upload_json_file(json_upload("{oops"));
        assert!(matches!(message, ImportMessage::Failed(ref reason) if reason.contains("JSON array")));
        assert!(message.is_error());
    }
}

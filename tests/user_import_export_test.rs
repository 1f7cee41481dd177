use anyhow::Result;
use fredbet::core::user_import_export::{ExportResponse, ImportMessage, UploadedFile};
use fredbet::{FredbetError, JsonFileUserImportExportService, UserImportExportController};
use tempfile::TempDir;

fn upload(content_type: &str, body: &str) -> Option<UploadedFile> {
    Some(UploadedFile {
        content_type: Some(content_type.to_string()),
        bytes: body.as_bytes().to_vec(),
    })
}

#[test]
fn test_import_then_export() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let controller = UserImportExportController::new(JsonFileUserImportExportService::new(
        temp_dir.path().join("users.json"),
    ));

    assert_eq!(controller.export_users()?, ExportResponse::NotFound);

    let users = serde_json::json!([
        {"username": "admin", "password": "{bcrypt}x", "roles": ["ROLE_ADMIN"], "child": false},
        {"username": "kid", "password": "{bcrypt}y", "roles": ["ROLE_USER"], "child": true}
    ]);
    let message = controller.upload_json_file(upload("application/json", &users.to_string()));
    assert_eq!(message, ImportMessage::Saved(2));

    let ExportResponse::Download(download) = controller.export_users()? else {
        panic!("expected exported users");
    };
    assert_eq!(download.file_name, "all_users.json");

    let exported: serde_json::Value = serde_json::from_slice(&download.body)?;
    assert_eq!(exported, users);
    Ok(())
}

#[test]
fn test_rejected_uploads_leave_store_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = temp_dir.path().join("users.json");
    let controller =
        UserImportExportController::new(JsonFileUserImportExportService::new(&store));

    assert_eq!(
        controller.upload_json_file(upload("text/csv", "username\nadmin")),
        ImportMessage::NoJsonFile
    );

    let message = controller.upload_json_file(upload("application/json", "not json"));
    assert_eq!(message.code(), "user.importexport.upload.msg.failed");

    assert!(!store.exists());
    Ok(())
}

#[test]
fn test_export_reports_corrupt_store() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = temp_dir.path().join("users.json");
    std::fs::write(&store, "{corrupt")?;
    let controller =
        UserImportExportController::new(JsonFileUserImportExportService::new(&store));

    let result = controller.export_users();
    assert!(matches!(result, Err(FredbetError::SerializationError(_))));
    Ok(())
}

#[tokio::test]
async fn test_controller_runs_on_blocking_pool() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let controller = UserImportExportController::new(JsonFileUserImportExportService::new(
        temp_dir.path().join("users.json"),
    ));

    let users = r#"[{"username": "admin", "password": "{bcrypt}x"}]"#;
    let (message, export) = tokio::task::spawn_blocking(move || {
        let message = controller.upload_json_file(upload("application/json", users));
        (message, controller.export_users())
    })
    .await?;

    assert_eq!(message, ImportMessage::Saved(1));
    assert!(matches!(export?, ExportResponse::Download(_)));
    Ok(())
}

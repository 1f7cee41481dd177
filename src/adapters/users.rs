use crate::domain::model::UserRecord;
use crate::domain::ports::UserImportExportService;
use crate::utils::error::{FredbetError, Result};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Keeps user accounts as a JSON array in a single file.
#[derive(Debug)]
pub struct JsonFileUserImportExportService {
    store_path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileUserImportExportService {
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn load_users(&self) -> Result<Vec<UserRecord>> {
        let content = match std::fs::read_to_string(&self.store_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(FredbetError::file_read_write(&self.store_path, e)),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn store_users(&self, users: &[UserRecord]) -> Result<()> {
        if let Some(parent) = self.store_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| FredbetError::file_read_write(parent, e))?;
        }
        let json = serde_json::to_string_pretty(users)?;
        std::fs::write(&self.store_path, json)
            .map_err(|e| FredbetError::file_read_write(&self.store_path, e))
    }
}

impl UserImportExportService for JsonFileUserImportExportService {
    fn export_all_users_to_json(&self) -> Result<String> {
        let users = self.load_users()?;
        if users.is_empty() {
            return Ok(String::new());
        }
        Ok(serde_json::to_string_pretty(&users)?)
    }

    fn import_users(&self, json: &str) -> Result<usize> {
        let incoming: Vec<UserRecord> =
            serde_json::from_str(json).map_err(|e| FredbetError::Import {
                message: e.to_string(),
            })?;

        let _guard = self.lock.lock().map_err(|_| FredbetError::Import {
            message: "user store lock poisoned".to_string(),
        })?;

        let mut users = self.load_users()?;
        let mut known: HashSet<String> = users.iter().map(|u| u.username.clone()).collect();

        let mut imported = 0;
        for user in incoming {
            if !known.insert(user.username.clone()) {
                tracing::debug!("User {} already exists, skipping", user.username);
                continue;
            }
            users.push(user);
            imported += 1;
        }

        if imported > 0 {
            self.store_users(&users)?;
        }
        tracing::info!("Imported {} users", imported);
        Ok(imported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn user(name: &str) -> UserRecord {
        UserRecord {
            username: name.to_string(),
            password: "{bcrypt}hash".to_string(),
            roles: vec!["ROLE_USER".to_string()],
            child: false,
        }
    }

    #[test]
    fn test_export_without_users_is_blank() {
        let temp_dir = TempDir::new().unwrap();
        let service = JsonFileUserImportExportService::new(temp_dir.path().join("users.json"));
        assert_eq!(service.export_all_users_to_json().unwrap(), "");
    }

    #[test]
    fn test_import_skips_existing_usernames() {
        let temp_dir = TempDir::new().unwrap();
        let service = JsonFileUserImportExportService::new(temp_dir.path().join("users.json"));

        let first = serde_json::to_string(&vec![user("alice"), user("bob")]).unwrap();
        assert_eq!(service.import_users(&first).unwrap(), 2);

        let second = serde_json::to_string(&vec![user("bob"), user("carol")]).unwrap();
        assert_eq!(service.import_users(&second).unwrap(), 1);

        let names: Vec<String> = service
            .load_users()
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let service = JsonFileUserImportExportService::new(temp_dir.path().join("users.json"));
        assert!(matches!(
            service.import_users("{not json"),
            Err(FredbetError::Import { .. })
        ));
    }

    #[test]
    fn test_optional_fields_default() {
        let temp_dir = TempDir::new().unwrap();
        let service = JsonFileUserImportExportService::new(temp_dir.path().join("users.json"));
        let count = service
            .import_users(r#"[{"username": "dave", "password": "secret"}]"#)
            .unwrap();
        assert_eq!(count, 1);

        let users = service.load_users().unwrap();
        assert!(users[0].roles.is_empty());
        assert!(!users[0].child);
    }
}

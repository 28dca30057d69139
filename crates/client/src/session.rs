//! Stored login session (token + account email).

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
}

impl Session {
    /// Loads the stored session, `None` when nobody is logged in.
    pub fn load(path: &str) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    /// Removes the stored session; missing file counts as logged out.
    pub fn clear(path: &str) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let loaded = Session::load(path.to_str().unwrap()).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/session.json");
        let path = path.to_str().unwrap();

        let session = Session {
            token: "tok".to_string(),
            email: "a@b.c".to_string(),
        };
        session.save(path).unwrap();

        let loaded = Session::load(path).unwrap().unwrap();
        assert_eq!(loaded.token, "tok");
        assert_eq!(loaded.email, "a@b.c");
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let path = path.to_str().unwrap();

        Session {
            token: "tok".to_string(),
            email: "a@b.c".to_string(),
        }
        .save(path)
        .unwrap();

        Session::clear(path).unwrap();
        Session::clear(path).unwrap();
        assert!(Session::load(path).unwrap().is_none());
    }
}

use std::fs;
use std::path::Path;

use tracing::debug;

/// Default name of the file holding an artifact's tracker project key
pub const DEFAULT_KEY_FILE_NAME: &str = ".jira-key";

/// Reads the tracker project key stored next to the project manifest.
///
/// The key file contains just the key, surrounding whitespace is ignored.
/// A missing or unreadable file yields an empty key, which the publish
/// workflow treats as "this artifact has no tracker project".
///
/// # Arguments
/// * `project_dir` - Directory containing the project manifest
/// * `key_file_name` - Name of the key file inside that directory
pub fn resolve_project_key(project_dir: &Path, key_file_name: &str) -> String {
    let key_file = project_dir.join(key_file_name);
    match fs::read_to_string(&key_file) {
        Ok(content) => content.trim().to_string(),
        Err(e) => {
            debug!("No project key read from {}: {}", key_file.display(), e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_key_is_trimmed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DEFAULT_KEY_FILE_NAME), "  ABC\n").unwrap();

        assert_eq!(resolve_project_key(dir.path(), DEFAULT_KEY_FILE_NAME), "ABC");
    }

    #[test]
    fn test_custom_key_file_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tracker.key"), "XYZ").unwrap();

        assert_eq!(resolve_project_key(dir.path(), "tracker.key"), "XYZ");
        assert_eq!(resolve_project_key(dir.path(), DEFAULT_KEY_FILE_NAME), "");
    }

    #[test]
    fn test_missing_key_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_project_key(dir.path(), DEFAULT_KEY_FILE_NAME), "");
    }

    #[test]
    fn test_blank_key_file_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DEFAULT_KEY_FILE_NAME), "\n\t \n").unwrap();

        assert_eq!(resolve_project_key(dir.path(), DEFAULT_KEY_FILE_NAME), "");
    }
}

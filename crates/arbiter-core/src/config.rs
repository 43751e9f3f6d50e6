use std::path::Path;

/// Defaults for a qualification run.
#[derive(Debug, Clone)]
pub struct CheckParams {
    /// Account whose created tournaments form the event series.
    pub creator: String,
    /// Substring the tournament full name must contain.
    pub name_filter: String,
    /// Standings to request per event. Increase when a run reports
    /// insufficient candidates.
    pub nb: usize,
    /// Maximum newly qualified players per event.
    pub cap: usize,
}

impl Default for CheckParams {
    fn default() -> Self {
        Self {
            creator: "konstantinos07".to_string(),
            name_filter: "World Fischer Random".to_string(),
            nb: 1000,
            cap: 500,
        }
    }
}

/// Read an API token from `dir`: a `TOKEN=` line in `.env`, else the
/// contents of a `token` file. Absence is not an error.
pub fn load_token(dir: &Path) -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(dir.join(".env")) {
        for line in content.lines() {
            if let Some(token) = line.strip_prefix("TOKEN=") {
                let token = token.trim();
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }
    std::fs::read_to_string(dir.join("token"))
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_file_token() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "OTHER=x\nTOKEN=lip_abc123\n").unwrap();
        assert_eq!(load_token(dir.path()).as_deref(), Some("lip_abc123"));
    }

    #[test]
    fn env_file_takes_precedence_over_token_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "TOKEN=from_env\n").unwrap();
        std::fs::write(dir.path().join("token"), "from_file\n").unwrap();
        assert_eq!(load_token(dir.path()).as_deref(), Some("from_env"));
    }

    #[test]
    fn token_file_fallback_trims_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("token"), "lip_xyz\n").unwrap();
        assert_eq!(load_token(dir.path()).as_deref(), Some("lip_xyz"));
    }

    #[test]
    fn no_files_no_token() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_token(dir.path()), None);
    }

    #[test]
    fn blank_token_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "TOKEN=\n").unwrap();
        assert_eq!(load_token(dir.path()), None);
    }
}

//! Session secret persistence, so the CLI stays signed in between
//! invocations.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;

/// Load a previously stored session secret, if any.
pub fn load(path: &Path) -> anyhow::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(raw) => {
            let secret = raw.trim().to_string();
            Ok((!secret.is_empty()).then_some(secret))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading session file {}", path.display())),
    }
}

/// Persist the session secret.
pub fn store(path: &Path, secret: &str) -> anyhow::Result<()> {
    fs::write(path, secret)
        .with_context(|| format!("writing session file {}", path.display()))
}

/// Forget the stored session.
pub fn clear(path: &Path) -> anyhow::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("removing session file {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");

        assert_eq!(load(&path).unwrap(), None);

        store(&path, "secret-token").unwrap();
        assert_eq!(load(&path).unwrap(), Some("secret-token".to_string()));

        clear(&path).unwrap();
        assert_eq!(load(&path).unwrap(), None);
        // Clearing twice is fine.
        clear(&path).unwrap();
    }
}

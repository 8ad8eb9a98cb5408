//! Writing generated images to local file storage.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::VaultError;

/// Decode a base64 image payload and write it under `dir`.
///
/// The filename is `<stem>_<random>.png`; the random suffix keeps repeated
/// generations for the same entity from colliding. The directory is created
/// on demand. Returns the path of the written file.
pub async fn save_base64_image(
    dir: &Path,
    stem: &str,
    b64: &str,
) -> Result<PathBuf, VaultError> {
    let bytes = STANDARD.decode(b64)?;

    tokio::fs::create_dir_all(dir).await?;
    let suffix: u32 = rand::random();
    let path = dir.join(format!("{}_{}.png", stem, suffix));
    tokio::fs::write(&path, &bytes).await?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_decodes_and_writes() {
        let dir = TempDir::new().unwrap();
        let b64 = STANDARD.encode(b"not a real png");

        let path = save_base64_image(dir.path(), "42", &b64).await.unwrap();

        assert!(path.starts_with(dir.path()));
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("42_"));
        assert!(name.ends_with(".png"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"not a real png");
    }

    #[tokio::test]
    async fn test_save_creates_missing_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("ingredient_images");
        let b64 = STANDARD.encode(b"x");

        let path = save_base64_image(&nested, "7", &b64).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_save_rejects_bad_base64() {
        let dir = TempDir::new().unwrap();
        let result = save_base64_image(dir.path(), "1", "!!not-base64!!").await;
        assert!(matches!(result, Err(VaultError::Decode(_))));
    }
}

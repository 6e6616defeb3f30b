//! # Token Upload
//!
//! The attendant points the kiosk at a screenshot of the provider app's
//! token. The file is only inspected locally (type and size) to build a
//! preview; its contents are never read or sent anywhere.

use super::error::{CheckinError, CheckinResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Default upload limit: 5 MiB.
pub const DEFAULT_MAX_TOKEN_BYTES: u64 = 5 * 1024 * 1024;

/// Image types accepted as token screenshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenImageKind {
    Png,
    Jpeg,
    Webp,
}

impl TokenImageKind {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(TokenImageKind::Png),
            "jpg" | "jpeg" => Some(TokenImageKind::Jpeg),
            "webp" => Some(TokenImageKind::Webp),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            TokenImageKind::Png => "image/png",
            TokenImageKind::Jpeg => "image/jpeg",
            TokenImageKind::Webp => "image/webp",
        }
    }
}

/// A validated token file, ready to preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFile {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: TokenImageKind,
    pub size: u64,
}

impl TokenFile {
    /// Validate the file at `path` against the accepted types and `max_bytes`.
    pub fn inspect(path: &Path, max_bytes: u64) -> CheckinResult<Self> {
        if path.as_os_str().is_empty() {
            return Err(CheckinError::InvalidInput(
                "informe o caminho do arquivo".to_string(),
            ));
        }

        let kind = TokenImageKind::from_path(path).ok_or_else(|| {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("sem extensão");
            CheckinError::UnsupportedFileType(ext.to_string())
        })?;

        let metadata = fs::metadata(path).map_err(|e| CheckinError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !metadata.is_file() {
            return Err(CheckinError::Unreadable {
                path: path.to_path_buf(),
                reason: "não é um arquivo".to_string(),
            });
        }

        let size = metadata.len();
        if size > max_bytes {
            return Err(CheckinError::FileTooLarge {
                size,
                limit: max_bytes,
            });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            kind,
            size,
        })
    }

    /// Human-readable size for the preview, e.g. `812 B`, `1.5 KiB`.
    pub fn display_size(&self) -> String {
        format_bytes(self.size)
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{bytes} B")
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, len: usize) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, vec![0u8; len]).expect("write");
        path
    }

    #[test]
    fn test_accepts_supported_image() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write_file(&dir, "token.PNG", 2048);

        let token = TokenFile::inspect(&path, DEFAULT_MAX_TOKEN_BYTES).expect("valid token");
        assert_eq!(token.kind, TokenImageKind::Png);
        assert_eq!(token.file_name, "token.PNG");
        assert_eq!(token.size, 2048);
        assert_eq!(token.display_size(), "2.0 KiB");
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write_file(&dir, "token.pdf", 10);

        let err = TokenFile::inspect(&path, DEFAULT_MAX_TOKEN_BYTES).unwrap_err();
        assert_eq!(err, CheckinError::UnsupportedFileType("pdf".to_string()));
    }

    #[test]
    fn test_rejects_missing_extension() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write_file(&dir, "token", 10);

        let err = TokenFile::inspect(&path, DEFAULT_MAX_TOKEN_BYTES).unwrap_err();
        assert!(matches!(err, CheckinError::UnsupportedFileType(_)));
    }

    #[test]
    fn test_rejects_file_too_large() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write_file(&dir, "token.jpg", 101);

        let err = TokenFile::inspect(&path, 100).unwrap_err();
        assert_eq!(
            err,
            CheckinError::FileTooLarge {
                size: 101,
                limit: 100
            }
        );
    }

    #[test]
    fn test_size_at_limit_is_accepted() {
        let dir = TempDir::new().expect("create temp dir");
        let path = write_file(&dir, "token.webp", 100);
        assert!(TokenFile::inspect(&path, 100).is_ok());
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("nope.png");

        let err = TokenFile::inspect(&path, DEFAULT_MAX_TOKEN_BYTES).unwrap_err();
        assert!(matches!(err, CheckinError::Unreadable { .. }));
    }

    #[test]
    fn test_empty_path_is_invalid_input() {
        let err = TokenFile::inspect(Path::new(""), DEFAULT_MAX_TOKEN_BYTES).unwrap_err();
        assert!(matches!(err, CheckinError::InvalidInput(_)));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
    }
}

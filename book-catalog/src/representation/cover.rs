//! Cover images and the placeholder served when a book has none

use std::path::Path;

use axum::body::Bytes;

use crate::error::{Error, Result};

/// Built-in placeholder cover (PNG)
pub const PLACEHOLDER_COVER: &[u8] = include_bytes!("../../assets/placeholder-cover.png");

const JPEG_MAGIC: &[u8] = b"\xff\xd8\xff";
const GIF87_MAGIC: &[u8] = b"GIF87a";
const GIF89_MAGIC: &[u8] = b"GIF89a";

/// Content type of an image, judged from its leading bytes
///
/// Unrecognised data is reported as `image/png`, the type uploads are sent as.
pub fn sniff_content_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(JPEG_MAGIC) {
        "image/jpeg"
    } else if bytes.starts_with(GIF87_MAGIC) || bytes.starts_with(GIF89_MAGIC) {
        "image/gif"
    } else {
        "image/png"
    }
}

/// Load the placeholder cover
///
/// With no configured path the built-in image is used. A configured file
/// that cannot be read is a startup error, as is an empty one.
pub async fn load_placeholder(path: Option<&Path>) -> Result<Bytes> {
    let Some(path) = path else {
        return Ok(Bytes::from_static(PLACEHOLDER_COVER));
    };

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        Error::InvalidConfig(format!(
            "cannot read placeholder cover {}: {}",
            path.display(),
            e
        ))
    })?;

    if bytes.is_empty() {
        return Err(Error::InvalidConfig(format!(
            "placeholder cover {} is empty",
            path.display()
        )));
    }

    tracing::info!(path = %path.display(), bytes = bytes.len(), "loaded placeholder cover");
    Ok(Bytes::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn test_builtin_placeholder_is_png() {
        assert!(PLACEHOLDER_COVER.starts_with(PNG_MAGIC));
        assert_eq!(sniff_content_type(PLACEHOLDER_COVER), "image/png");
    }

    #[test]
    fn test_sniffing() {
        assert_eq!(sniff_content_type(b"\xff\xd8\xff\xe0rest"), "image/jpeg");
        assert_eq!(sniff_content_type(b"GIF89a..."), "image/gif");
        assert_eq!(sniff_content_type(b"GIF87a..."), "image/gif");
        assert_eq!(sniff_content_type(b"unknown"), "image/png");
    }

    #[tokio::test]
    async fn test_load_builtin_placeholder() {
        let bytes = load_placeholder(None).await.unwrap();
        assert_eq!(&bytes[..], PLACEHOLDER_COVER);
    }

    #[tokio::test]
    async fn test_load_placeholder_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"GIF89a-custom").unwrap();

        let bytes = load_placeholder(Some(file.path())).await.unwrap();
        assert_eq!(&bytes[..], b"GIF89a-custom");
    }

    #[tokio::test]
    async fn test_missing_or_empty_placeholder_file_fails() {
        let missing = load_placeholder(Some(Path::new("/nonexistent/cover.png"))).await;
        assert!(matches!(missing, Err(Error::InvalidConfig(_))));

        let empty = tempfile::NamedTempFile::new().unwrap();
        let result = load_placeholder(Some(empty.path())).await;
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}

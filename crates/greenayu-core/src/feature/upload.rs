//! Image upload validation.

use crate::error::FeatureError;
use std::fmt;

/// MIME types the image endpoints accept.
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Largest accepted upload, in bytes.
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Shown when no file was chosen.
pub const MISSING_IMAGE_MESSAGE: &str = "Please upload an image file (JPG/PNG/WEBP).";
/// Shown when the MIME type is not allowed.
pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Unsupported file type. Please upload JPG, PNG, or WEBP.";
/// Shown when the file exceeds [`MAX_IMAGE_BYTES`].
pub const TOO_LARGE_MESSAGE: &str = "File is too large. Max 10MB.";

/// A user-chosen image, fully read into memory.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name, forwarded as the multipart file name.
    pub file_name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Bundles a file.
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Checks type and size.
    pub fn validate(&self) -> Result<(), FeatureError> {
        validate_image_meta(&self.mime_type, self.size())
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Checks type and size from metadata alone, before the file is read.
pub fn validate_image_meta(mime_type: &str, size: u64) -> Result<(), FeatureError> {
    let mime_type = mime_type.trim().to_ascii_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&mime_type.as_str()) {
        return Err(FeatureError::Validation(UNSUPPORTED_TYPE_MESSAGE.to_string()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(FeatureError::Validation(TOO_LARGE_MESSAGE.to_string()));
    }
    Ok(())
}

/// Validates an optional upload, treating `None` as "no file chosen".
pub fn require_image(upload: Option<&ImageUpload>) -> Result<&ImageUpload, FeatureError> {
    let upload =
        upload.ok_or_else(|| FeatureError::Validation(MISSING_IMAGE_MESSAGE.to_string()))?;
    upload.validate()?;
    Ok(upload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("image/jpeg")]
    #[case("image/png")]
    #[case("image/webp")]
    #[case("IMAGE/PNG")]
    fn accepts_allowed_types(#[case] mime: &str) {
        assert!(validate_image_meta(mime, 1024).is_ok());
    }

    #[rstest]
    #[case("image/gif")]
    #[case("application/pdf")]
    #[case("")]
    fn rejects_other_types(#[case] mime: &str) {
        assert_eq!(
            validate_image_meta(mime, 10).unwrap_err().to_string(),
            UNSUPPORTED_TYPE_MESSAGE
        );
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(validate_image_meta("image/png", MAX_IMAGE_BYTES).is_ok());
        assert_eq!(
            validate_image_meta("image/png", MAX_IMAGE_BYTES + 1)
                .unwrap_err()
                .to_string(),
            TOO_LARGE_MESSAGE
        );
    }

    #[test]
    fn missing_upload_is_rejected() {
        assert_eq!(
            require_image(None).unwrap_err().to_string(),
            MISSING_IMAGE_MESSAGE
        );
    }

    #[test]
    fn debug_hides_bytes() {
        let upload = ImageUpload::new("leaf.png", "image/png", vec![7; 3]);
        let text = format!("{:?}", upload);
        assert!(text.contains("size: 3"));
        assert!(!text.contains("[7, 7, 7]"));
    }
}

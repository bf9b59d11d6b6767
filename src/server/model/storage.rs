//! Upload buckets and public URLs of stored files.

use crate::server::error::AppError;

/// Directory an uploaded image is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Avatars,
    Games,
    Communities,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Avatars => "avatars",
            Self::Games => "games",
            Self::Communities => "communities",
        }
    }

    /// Parses a bucket name taken from a request path.
    ///
    /// # Returns
    /// - `Ok(Bucket)` - Known bucket
    /// - `Err(AppError::NotFound)` - Any other name
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "avatars" => Ok(Self::Avatars),
            "games" => Ok(Self::Games),
            "communities" => Ok(Self::Communities),
            _ => Err(AppError::NotFound("File not found".to_string())),
        }
    }
}

/// Image formats accepted for upload, keyed by content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Webp,
    Gif,
}

impl ImageKind {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        // Ignore parameters such as "; charset=binary"
        let mime = content_type.split(';').next().unwrap_or("").trim();
        match mime.to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::Webp),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
            Self::Gif => "gif",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }
}

/// Public URL of a stored file path (`{bucket}/{name}`).
pub fn storage_url(path: Option<&str>) -> Option<String> {
    path.map(|p| format!("/api/storage/{}", p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_parameters_are_ignored() {
        assert_eq!(
            ImageKind::from_content_type("image/PNG; charset=binary"),
            Some(ImageKind::Png)
        );
        assert_eq!(ImageKind::from_content_type("application/pdf"), None);
    }

    #[test]
    fn unknown_bucket_is_not_found() {
        assert!(matches!(
            Bucket::parse("secrets"),
            Err(AppError::NotFound(_))
        ));
        assert_eq!(Bucket::parse("games").unwrap(), Bucket::Games);
    }
}

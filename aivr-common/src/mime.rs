//! Content types for served assets

use std::path::Path;

/// Fallback for extensions not in the table
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Image extensions the manifest generator picks up (lowercase, no dot)
pub const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "avif"];

/// Content type for a lowercase extension without the dot
pub fn content_type_for_extension(extension: &str) -> Option<&'static str> {
    let content_type = match extension {
        "html" => "text/html; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(content_type)
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

/// Content type for a file path, case-insensitive on the extension
pub fn content_type_for(path: &Path) -> &'static str {
    lowercase_extension(path)
        .and_then(|ext| content_type_for_extension(&ext))
        .unwrap_or(OCTET_STREAM)
}

/// True if the file has one of [`IMAGE_EXTENSIONS`]
pub fn is_supported_image(path: &Path) -> bool {
    lowercase_extension(path)
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types() {
        assert_eq!(content_type_for(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(content_type_for(Path::new("app.js")), "text/javascript; charset=utf-8");
        assert_eq!(content_type_for(Path::new("a/b.JPEG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("x.svg")), "image/svg+xml");
    }

    #[test]
    fn test_unknown_and_missing_extension() {
        assert_eq!(content_type_for(Path::new("notes.txt")), OCTET_STREAM);
        assert_eq!(content_type_for(Path::new("Makefile")), OCTET_STREAM);
    }

    #[test]
    fn test_supported_images() {
        assert!(is_supported_image(Path::new("a.PNG")));
        assert!(is_supported_image(Path::new("a.avif")));
        assert!(!is_supported_image(Path::new("a.html")));
        assert!(!is_supported_image(Path::new(".png")));
    }
}

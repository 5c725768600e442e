//! URL and media type detection for pasted and dropped content.

use std::path::Path;

use url::Url;

/// File extensions treated as images, lower-cased.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "ai", "apng", "art", "avif", "bmp", "cgm", "cr2", "cur", "dds", "dib", "djvu", "emf", "eps",
    "exif", "gif", "heic", "heif", "icns", "ico", "jfif", "jng", "jp2", "jpeg", "jpg", "jps",
    "jxl", "jxr", "nef", "odg", "pbm", "pct", "pcx", "pgm", "pict", "png", "pnm", "ppm", "psd",
    "raw", "sgi", "svg", "tga", "tif", "tiff", "webp", "wmf", "xbm", "xcf", "xpm",
];

/// Check if text is an absolute URL.
///
/// The text must parse as a URL with a host that is either `localhost` or
/// contains a dot, and must not contain whitespace.
///
/// # Example
/// ```
/// use markleaf::detect::is_url;
///
/// assert!(is_url("https://example.com/a.png"));
/// assert!(is_url("http://localhost:8080"));
/// assert!(!is_url("example.com"));
/// assert!(!is_url("hello world"));
/// ```
pub fn is_url(text: &str) -> bool {
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        return false;
    }
    match Url::parse(text) {
        Ok(url) => url
            .host_str()
            .is_some_and(|host| host == "localhost" || host.contains('.')),
        Err(_) => false,
    }
}

/// Check if text is a URL whose path ends in an image extension.
pub fn is_image_url(text: &str) -> bool {
    if !is_url(text) {
        return false;
    }
    let Ok(url) = Url::parse(text) else {
        return false;
    };
    url.path()
        .rsplit('.')
        .next()
        .is_some_and(is_image_extension)
}

/// Check if a file extension (without the dot) is an image extension.
pub fn is_image_extension(extension: &str) -> bool {
    let extension = extension.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&extension.as_str())
}

/// Check if a MIME type is an image type (`image/*`).
pub fn is_image_mime(mime: &str) -> bool {
    mime.split('/')
        .next()
        .is_some_and(|top| top.trim().eq_ignore_ascii_case("image"))
}

/// Guess the MIME type of a file from its extension.
pub fn guess_mime<P: AsRef<Path>>(path: P) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com"));
        assert!(is_url("ftp://files.example.org/pub"));
        assert!(is_url("http://localhost/x"));
        assert!(!is_url(""));
        assert!(!is_url("not a url"));
        assert!(!is_url("https://intranet/page"));
        assert!(!is_url("mailto:someone@example.com"));
    }

    #[test]
    fn test_is_image_url() {
        assert!(is_image_url("https://example.com/cat.png"));
        assert!(is_image_url("https://example.com/a/b/photo.JPG?size=large"));
        assert!(!is_image_url("https://example.com/page.html"));
        assert!(!is_image_url("https://example.com/"));
        assert!(!is_image_url("cat.png"));
    }

    #[test]
    fn test_is_image_mime() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("IMAGE/svg+xml"));
        assert!(!is_image_mime("text/plain"));
        assert!(!is_image_mime(""));
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime("photo.png"), "image/png");
        assert_eq!(guess_mime("notes.unknown-ext"), "application/octet-stream");
    }
}

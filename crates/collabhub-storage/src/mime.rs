//! Content type inference from file names.

/// Content type used when nothing better is known.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Guess a MIME type from a file name's extension.
pub fn from_name(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "js" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => return None,
    };
    Some(mime)
}

/// Guess a MIME type, falling back to [`DEFAULT_CONTENT_TYPE`].
pub fn from_name_or_default(name: &str) -> &'static str {
    from_name(name).unwrap_or(DEFAULT_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(from_name("notes.TXT"), Some("text/plain"));
        assert_eq!(from_name("diagram.svg"), Some("image/svg+xml"));
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert_eq!(from_name("Makefile"), None);
        assert_eq!(from_name_or_default("blob.xyz"), DEFAULT_CONTENT_TYPE);
    }
}

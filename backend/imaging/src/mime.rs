//! MIME category checks for uploaded payloads.
//!
//! Uploads declare a content type; only the image category is accepted.
//! Magic-byte sniffing is used for log context, not for gating.

/// Whether a declared content type is in the image category.
///
/// Parameters after a `;` (e.g. `image/png; charset=binary`) are ignored.
pub fn is_image_mime(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}

/// Sniff the concrete image format from magic bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..]                                     => "image/jpeg",
        [0x89, b'P', b'N', b'G', ..]                               => "image/png",
        [b'G', b'I', b'F', b'8', ..]                               => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        [b'B', b'M', ..]                                           => "image/bmp",
        [0x49, 0x49, 0x2A, 0x00, ..] | [0x4D, 0x4D, 0x00, 0x2A, ..] => "image/tiff",
        _                                                          => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_image_types() {
        assert!(is_image_mime("image/jpeg"));
        assert!(is_image_mime("IMAGE/PNG"));
        assert!(is_image_mime("image/webp; charset=binary"));
    }

    #[test]
    fn rejects_non_image_types() {
        assert!(!is_image_mime("application/pdf"));
        assert!(!is_image_mime("text/html"));
        assert!(!is_image_mime(""));
    }

    #[test]
    fn sniffs_jpeg_and_png() {
        assert_eq!(sniff_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]), "image/jpeg");
        assert_eq!(sniff_image_mime(b"\x89PNG\r\n\x1a\n"), "image/png");
    }

    #[test]
    fn unknown_bytes_fallback() {
        assert_eq!(sniff_image_mime(b"plain text"), "application/octet-stream");
    }
}

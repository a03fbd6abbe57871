//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension, plus the
//! streaming-format overrides matched against the request path.

/// Get MIME Content-Type based on file extension
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // JavaScript/WASM
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Video and streaming
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("ogg" | "ogv") => "video/ogg",
        Some("mov") => "video/quicktime",
        Some("m3u8") => "application/x-mpegURL",
        Some("mpd") => "application/dash+xml",
        Some("ts") => "video/MP2T",

        // Audio
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("flac") => "audio/flac",
        Some("m4a") => "audio/mp4",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("eot") => "application/vnd.ms-fontobject",

        // Documents
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz" | "gzip") => "application/gzip",
        Some("tar") => "application/x-tar",

        // Default
        _ => "application/octet-stream",
    }
}

/// Streaming Content-Type override by request-path suffix
///
/// Video players are picky about HLS playlist and DASH manifest types, so
/// these win over whatever the extension table produced. The suffix match is
/// case-sensitive.
pub fn streaming_override(path: &str) -> Option<&'static str> {
    if path.ends_with(".m3u8") {
        Some("application/x-mpegURL")
    } else if path.ends_with(".mpd") {
        Some("application/dash+xml")
    } else if path.ends_with(".ts") {
        Some("video/MP2T")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(get_content_type(Some("html")), "text/html; charset=utf-8");
        assert_eq!(get_content_type(Some("css")), "text/css");
        assert_eq!(get_content_type(Some("js")), "application/javascript");
        assert_eq!(get_content_type(Some("json")), "application/json");
        assert_eq!(get_content_type(Some("png")), "image/png");
        assert_eq!(get_content_type(Some("mp4")), "video/mp4");
    }

    #[test]
    fn test_streaming_types() {
        assert_eq!(get_content_type(Some("m3u8")), "application/x-mpegURL");
        assert_eq!(get_content_type(Some("mpd")), "application/dash+xml");
        assert_eq!(get_content_type(Some("ts")), "video/MP2T");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("xyz")), "application/octet-stream");
        assert_eq!(get_content_type(None), "application/octet-stream");
    }

    #[test]
    fn test_streaming_override() {
        assert_eq!(
            streaming_override("/videos/master.m3u8"),
            Some("application/x-mpegURL")
        );
        assert_eq!(
            streaming_override("/videos/manifest.mpd"),
            Some("application/dash+xml")
        );
        assert_eq!(streaming_override("/videos/seg-001.ts"), Some("video/MP2T"));
        assert_eq!(streaming_override("/videos/movie.mp4"), None);
    }

    #[test]
    fn test_streaming_override_is_case_sensitive() {
        assert_eq!(streaming_override("/videos/SEG.TS"), None);
        assert_eq!(streaming_override("/videos/master.M3U8"), None);
    }
}

//! Icon selection for listing entries.
//!
//! Icons are Font Awesome class lists. A file's icon comes from its MIME type,
//! guessed from the extension: an exact type match wins, then the top-level
//! type (`image`, `video`, ...), then a generic file icon.

use std::path::Path;

/// Icon for the parent-directory row.
pub const PARENT_ICON: &str = "fas fa-level-up-alt";
/// Icon for subdirectories.
pub const FOLDER_ICON: &str = "fas fa-folder-open";
/// Icon for files with no better match.
pub const FILE_ICON: &str = "fas fa-file";

/// Guess a MIME type from a file extension.
fn guess_mime(ext: &str) -> Option<&'static str> {
    let mime = match ext.to_lowercase().as_str() {
        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/x-wav",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        "ogg" | "oga" => "audio/ogg",
        "m4a" => "audio/mp4",
        "aiff" | "aif" => "audio/x-aiff",
        // Video
        "mp4" | "m4v" => "video/mp4",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mov" | "qt" => "video/quicktime",
        "webm" => "video/webm",
        "mpeg" | "mpg" => "video/mpeg",
        "wmv" => "video/x-ms-wmv",
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/vnd.microsoft.icon",
        "tif" | "tiff" => "image/tiff",
        // Documents
        "pdf" => "application/pdf",
        "doc" | "dot" => "application/msword",
        "xls" | "xlb" => "application/vnd.ms-excel",
        "ppt" | "pps" => "application/vnd.ms-powerpoint",
        "txt" | "text" | "log" => "text/plain",
        "csv" => "text/csv",
        "md" => "text/markdown",
        // Web and code
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" => "application/javascript",
        "json" => "application/json",
        "xml" => "text/xml",
        "py" => "text/x-python",
        // Archives
        "zip" => "application/zip",
        "rar" => "application/x-rar-compressed",
        "tar" => "application/x-tar",
        "gz" | "tgz" => "application/gzip",
        "7z" => "application/x-7z-compressed",
        _ => return None,
    };
    Some(mime)
}

/// Icon for an exact MIME type or a top-level type.
fn icon_for_mime(mime: &str) -> Option<&'static str> {
    let icon = match mime {
        "video" => "fas fa-video",
        "image" => "fas fa-image",
        "audio" => "fas fa-music",
        "application/pdf" => "fas fa-file-pdf",
        "application/msword" => "fas fa-file-word",
        "application/vnd.ms-excel" => "fas fa-file-excel",
        "application/vnd.ms-powerpoint" => "fas fa-file-powerpoint",
        "application/zip" | "application/x-rar-compressed" => "fas fa-file-archive",
        "text/html" => "fab fa-html5",
        "text/css" => "fab fa-css3",
        "application/json" => "fas fa-file-code",
        "application/javascript" => "fab fa-js",
        "text/plain" => "fas fa-file-alt",
        _ => return None,
    };
    Some(icon)
}

/// Icon for a file path.
pub fn icon_for_path(path: &Path) -> &'static str {
    let Some(mime) = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(guess_mime)
    else {
        return FILE_ICON;
    };

    let main_type = mime.split('/').next().unwrap_or_default();
    icon_for_mime(mime)
        .or_else(|| icon_for_mime(main_type))
        .unwrap_or(FILE_ICON)
}

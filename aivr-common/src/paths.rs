//! URL path encoding and asset-root path safety
//!
//! Manifest paths are plain relative file paths (`folder/my file.png`). Before
//! they are used as a URL every segment is percent-encoded with the same
//! rules as JavaScript's `encodeURIComponent`. The server goes the other way:
//! it decodes the request path and resolves it lexically under the asset
//! root, refusing anything that climbs out.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Request path served for `/`
pub const INDEX_PATH: &str = "/index.html";

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')'
        )
}

/// Percent-encode a single path segment (`encodeURIComponent` rules)
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for &byte in segment.as_bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

/// Percent-encode each `/`-separated segment, keeping the separators
///
/// `"folder/my file.png"` becomes `"folder/my%20file.png"`.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Decode `%XX` escapes; malformed escapes or non-UTF-8 output are errors
pub fn percent_decode(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value);
            let lo = bytes.get(i + 2).copied().and_then(hex_value);
            match (hi, lo) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 3;
                }
                _ => {
                    return Err(Error::InvalidPath(format!(
                        "malformed percent escape in '{}'",
                        input
                    )))
                }
            }
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out)
        .map_err(|_| Error::InvalidPath(format!("'{}' does not decode to UTF-8", input)))
}

/// Resolve an already-decoded request path under `root`
///
/// Normalizes `.` and `..` lexically. Returns `None` when the path would
/// leave `root`.
pub fn resolve_under_root(root: &Path, request_path: &str) -> Option<PathBuf> {
    if request_path.contains('\0') {
        return None;
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in request_path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    let mut resolved = root.to_path_buf();
    resolved.extend(segments);
    Some(resolved)
}

/// Map a raw (still encoded) URL path to a file under `root`
///
/// `Ok(None)` means the path escapes the root; `Err` means it could not be
/// decoded.
pub fn safe_asset_path(root: &Path, url_path: &str) -> Result<Option<PathBuf>> {
    let decoded = percent_decode(url_path)?;
    let request_path = if decoded == "/" {
        INDEX_PATH
    } else {
        decoded.as_str()
    };
    Ok(resolve_under_root(root, request_path))
}

/// Join path components with `/` regardless of platform
pub fn to_posix(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

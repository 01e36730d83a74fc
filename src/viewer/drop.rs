//! Drop pre-filter.
//!
//! A drop may carry several URLs; only the first is considered. It must
//! name a local file whose name ends with the report suffix. Anything else
//! is rejected with `SourceError::UnsupportedSource`, which callers treat
//! as "ignore silently".

use crate::utils::config::PROFILE_FILE_SUFFIX;
use crate::utils::error::SourceError;
use std::path::PathBuf;

/// Resolve the file a drop refers to
///
/// **Public** - first step of `ViewModel::handle_drop`
///
/// Accepted forms:
/// - `file:///abs/path`, `file://localhost/abs/path`, `file:/abs/path`
///   (percent escapes decoded)
/// - a bare path with no URL scheme
pub fn resolve_drop<S: AsRef<str>>(urls: &[S]) -> Result<PathBuf, SourceError> {
    let first = urls
        .first()
        .ok_or_else(|| SourceError::UnsupportedSource("empty drop".to_string()))?;

    let path = local_file_path(first.as_ref())?;

    if !is_profile_file_name(&path) {
        return Err(SourceError::UnsupportedSource(format!(
            "{} does not end with {}",
            path.display(),
            PROFILE_FILE_SUFFIX
        )));
    }

    Ok(path)
}

/// Whether the file name carries the report suffix
pub fn is_profile_file_name(path: &std::path::Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(PROFILE_FILE_SUFFIX))
}

/// Turn a dropped URL into a local path
///
/// **Private** - internal helper for resolve_drop
fn local_file_path(url: &str) -> Result<PathBuf, SourceError> {
    let url = url.trim();
    let unsupported = || SourceError::UnsupportedSource(url.to_string());

    if url.is_empty() {
        return Err(unsupported());
    }

    let Some(rest) = strip_prefix_ignore_case(url, "file:") else {
        // Some other scheme (http://, ftp://, ...) is never local
        if url.contains("://") {
            return Err(unsupported());
        }
        return Ok(PathBuf::from(url));
    };

    let path = if let Some(authority_and_path) = rest.strip_prefix("//") {
        let (host, path) = match authority_and_path.find('/') {
            Some(slash) => authority_and_path.split_at(slash),
            None => (authority_and_path, ""),
        };
        if !(host.is_empty() || host.eq_ignore_ascii_case("localhost")) {
            return Err(unsupported());
        }
        path
    } else {
        rest
    };

    if path.is_empty() {
        return Err(unsupported());
    }

    let decoded = percent_decode(path).ok_or_else(unsupported)?;

    // file:///C:/dir/x -> C:/dir/x
    let bytes = decoded.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':' {
        return Ok(PathBuf::from(&decoded[1..]));
    }

    Ok(PathBuf::from(decoded))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

/// Decode `%XX` escapes; `None` on a broken escape or non-UTF-8 result
fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = input.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok()
}

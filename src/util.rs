//! Byte decoding and path helpers shared by the importers.

use std::borrow::Cow;

use crate::error::{Error, Result};

/// Strip UTF-8 BOM (byte order mark) if present
pub fn strip_bom(data: &[u8]) -> &[u8] {
    // UTF-8 BOM: EF BB BF
    data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data)
}

/// Decode bytes leniently, never failing.
///
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from `<?xml encoding="..."?>`)
/// 3. Falls back to Windows-1252 (common in old ebooks)
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Decode bytes strictly.
///
/// Honors an encoding named in an XML declaration; otherwise the input must
/// be UTF-8 (an initial BOM is dropped). Malformed input is an error.
pub fn decode_strict(bytes: &[u8]) -> Result<Cow<'_, str>> {
    if let Some(label) = extract_xml_encoding(bytes)
        && let Some(encoding) = encoding_rs::Encoding::for_label(label.as_bytes())
        && encoding != encoding_rs::UTF_8
    {
        let (text, used, malformed) = encoding.decode(bytes);
        if malformed {
            return Err(Error::Encoding(format!("malformed {} input", used.name())));
        }
        return Ok(text);
    }

    Ok(Cow::Borrowed(std::str::from_utf8(strip_bom(bytes))?))
}

/// Extract the encoding label from an XML declaration, if any.
///
/// Only the first 100 bytes are examined.
pub fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    let check_len = bytes.len().min(100);
    let prefix = &bytes[..check_len];

    let xml_start = prefix.windows(5).position(|w| w == b"<?xml")?;
    let after_xml = &prefix[xml_start..];

    let enc_pos = after_xml
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let after_enc = &after_xml[enc_pos + 9..];

    let quote = *after_enc.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let value_end = after_enc[1..].iter().position(|&b| b == quote)? + 1;
    std::str::from_utf8(&after_enc[1..value_end]).ok()
}

/// Extract local name from potentially namespaced XML name
pub fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

/// Directory part of an archive path, without a trailing slash.
pub fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Resolve `href` against the archive directory `base_dir`.
///
/// Archive paths always use `/`. `.` segments are dropped and `..` pops a
/// segment (never above the archive root). A leading `/` makes `href`
/// root-relative.
pub fn resolve_relative_path(base_dir: &str, href: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();

    let joined = if let Some(rooted) = href.strip_prefix('/') {
        rooted.split('/').collect::<Vec<_>>()
    } else {
        base_dir.split('/').chain(href.split('/')).collect()
    };

    for part in joined {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            name => parts.push(name),
        }
    }

    parts.join("/")
}

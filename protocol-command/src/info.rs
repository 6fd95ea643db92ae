//! Parsing of the textual INFO reply.
//!
//! The reply is a blob of `key:value` lines grouped under `# Section`
//! headers. Parsing never fails: lines that do not fit the format are
//! skipped.

use memchr::memchr;

/// Parse an INFO reply into ordered `(key, value)` pairs.
///
/// Blank lines and `#` comment lines are ignored. Each remaining line is
/// split on its first `:`; lines without one are skipped. A key seen twice
/// keeps its first position and takes the later value.
pub fn parse_info_response(reply: &str) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = Vec::new();
    for line in lines(reply) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(colon) = memchr(b':', line.as_bytes()) else {
            tracing::debug!(line, "skipping INFO line without ':'");
            continue;
        };
        let (key, value) = (&line[..colon], &line[colon + 1..]);
        match entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => entries.push((key.to_string(), value.to_string())),
        }
    }
    entries
}

/// Split on `\n`, trimming a trailing `\r` from each line.
fn lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let line = match memchr(b'\n', rest.as_bytes()) {
            Some(pos) => {
                let line = &rest[..pos];
                rest = &rest[pos + 1..];
                line
            }
            None => std::mem::take(&mut rest),
        };
        Some(line.strip_suffix('\r').unwrap_or(line))
    })
}

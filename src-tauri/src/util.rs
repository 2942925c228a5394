use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, as a decimal string.
pub fn now_string() -> String {
    let ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    ms.to_string()
}

/// Today's calendar date (UTC) in `YYYY-MM-DD` form.
pub fn today_string() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Record id for either collection: `id-<epoch ms>-<20 hex digits>`. The
/// millisecond prefix keeps ids roughly creation-ordered in the stored JSON;
/// the random tail keeps ids from the same millisecond apart.
pub fn new_id() -> String {
    let mut bytes = [0_u8; 10];
    OsRng.fill_bytes(&mut bytes);
    let tail: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("id-{}-{tail}", now_string())
}

/// Generates ids until one is not already taken.
pub fn unique_id<F>(taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let id = new_id();
        if !taken(id.as_str()) {
            return id;
        }
    }
}

/// Strips control characters and caps the length in chars.
pub fn clamp_string(value: &str, max_len: usize, trim: bool) -> String {
    let mut out = if trim {
        value.trim().to_string()
    } else {
        value.to_string()
    };
    out = out
        .chars()
        .filter(|ch| {
            let code = *ch as u32;
            code >= 32 && code != 127
        })
        .collect();
    if out.chars().count() > max_len {
        out = out.chars().take(max_len).collect();
    }
    out
}

/// `None` for empty text, so optional fields never persist as `""`.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

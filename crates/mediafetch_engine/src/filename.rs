use std::sync::LazyLock;

use regex::Regex;

/// Used when the backend suggests no usable name.
pub const DEFAULT_AUDIO_FILENAME: &str = "audio.mp3";

const MAX_NAME_CHARS: usize = 120;

/// `filename="..."` or bare `filename=token`; `filename*=` is a different parameter.
static FILENAME_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|;)\s*filename\s*=\s*(?:"([^"]*)"|([^;\s]+))"#)
        .expect("filename pattern is valid")
});

/// Raw `filename` parameter of a Content-Disposition header, if any.
pub fn filename_from_disposition(header: Option<&str>) -> Option<String> {
    let caps = FILENAME_PARAM.captures(header?)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// Safe local filename for a binary payload.
pub fn suggested_filename(header: Option<&str>) -> String {
    filename_from_disposition(header)
        .map(|name| sanitize_filename(&name))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_AUDIO_FILENAME.to_string())
}

fn sanitize_filename(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);

    // Collapse multiple underscores
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }

    let mut final_name = truncate_keeping_extension(&compacted);
    let stem = final_name.split('.').next().unwrap_or_default().to_string();
    if is_reserved_windows_name(&stem) {
        final_name.insert(stem.len(), '_');
    }
    final_name
}

fn truncate_keeping_extension(name: &str) -> String {
    if name.chars().count() <= MAX_NAME_CHARS {
        return name.to_string();
    }
    let (stem, ext) = match name.rfind('.') {
        Some(dot) if name.len() - dot <= 8 => (&name[..dot], &name[dot..]),
        _ => (name, ""),
    };
    let keep = MAX_NAME_CHARS.saturating_sub(ext.chars().count());
    let mut truncated: String = stem.chars().take(keep).collect();
    truncated.push_str(ext);
    truncated
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}' | '\u{7F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

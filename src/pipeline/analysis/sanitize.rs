// Sanitize user-entered free text before it is embedded in the analysis request.
// Notes and locations are short single-line fields; anything that looks like
// an instruction to the model is dropped. Disease names are analysis inputs in
// their own right, so only a leading role marker is stripped from them.

/// Maximum characters kept for a disease name or location.
pub const MAX_LABEL_CHARS: usize = 100;

/// Maximum characters kept for a free-text note.
pub const MAX_NOTE_CHARS: usize = 500;

const TRUNCATION_MARKER: &str = "…";

/// Clean a single free-text field for the request. Returns an empty string
/// when the field carries an injection attempt.
pub fn sanitize_field(raw: &str, max_chars: usize) -> String {
    let cleaned = remove_invisible_chars(raw);
    let collapsed = collapse_whitespace(&cleaned);

    if is_injection_attempt(&collapsed.to_lowercase()) {
        tracing::warn!(
            field_len = collapsed.chars().count(),
            "Instruction-like text removed from analysis input"
        );
        return String::new();
    }

    truncate_chars(&collapsed, max_chars)
}

/// Clean a disease name for the request. The name is kept as entered apart
/// from invisible characters, whitespace runs and any leading role marker
/// (`user:`, `[system]`, ...). No length cap.
pub fn sanitize_label(raw: &str) -> String {
    let mut label = collapse_whitespace(&remove_invisible_chars(raw));
    while let Some(rest) = strip_role_marker(&label) {
        label = rest.trim_start().to_string();
    }
    label
}

/// The field carries a role marker or an instruction override, after the
/// same normalization `sanitize_field` applies.
pub fn contains_instruction(raw: &str) -> bool {
    let collapsed = collapse_whitespace(&remove_invisible_chars(raw));
    is_injection_attempt(&collapsed.to_lowercase())
}

const ROLE_MARKERS: &[&str] = &[
    "system:",
    "assistant:",
    "user:",
    "[system]",
    "[inst]",
    "<<sys>>",
    "note to ai:",
    "instructions:",
];

/// The text after a leading role marker, matched case-insensitively.
fn strip_role_marker(text: &str) -> Option<&str> {
    ROLE_MARKERS.iter().find_map(|marker| {
        let head = text.get(..marker.len())?;
        head.eq_ignore_ascii_case(marker)
            .then(|| &text[marker.len()..])
    })
}

/// Remove zero-width, bidi and control characters. Line breaks and tabs are
/// turned into spaces since every field is single-line.
fn remove_invisible_chars(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2060}'..='\u{2064}' | '\u{FEFF}' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_injection_attempt(lower: &str) -> bool {
    const OVERRIDES: &[&str] = &[
        "ignore previous instructions",
        "ignore all instructions",
        "ignore the above",
        "disregard your instructions",
        "disregard all instructions",
        "forget your instructions",
        "new instructions:",
        "override:",
        "이전 지시를 무시",
    ];

    ROLE_MARKERS.iter().any(|m| lower.starts_with(m))
        || OVERRIDES.iter().any(|o| lower.contains(o))
        || lower.contains("<system")
        || lower.contains("<instruction")
}

/// Truncate on a char boundary, preferring the last space before the limit.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    match cut.rfind(' ') {
        Some(pos) if pos > 0 => format!("{}{TRUNCATION_MARKER}", &cut[..pos]),
        _ => format!("{cut}{TRUNCATION_MARKER}"),
    }
}

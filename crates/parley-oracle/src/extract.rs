//! Tolerant JSON extraction from raw model completions.
//!
//! Models asked for "JSON only" still wrap their output in code fences or
//! prose often enough that the boundary has to cope: strip fences, then take
//! the first balanced `{...}` object. Anything beyond that is a shape
//! violation handled by the caller.

/// Extract the first JSON object from a completion.
///
/// Returns `None` when no balanced object exists. Brace matching ignores
/// braces inside string literals.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let trimmed = strip_code_fence(text.trim());

    let start = trimmed.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in trimmed[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&trimmed[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the language tag line, then the closing fence.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Python-literal repair
//!
//! Models trained on mixed corpora sometimes answer with a Python dict
//! literal instead of JSON: single-quoted strings, `True`/`False`/`None`,
//! trailing commas. This rewrites such text into JSON so it can go through
//! the same strict parser as every other candidate.

/// Rewrite Python literal syntax into JSON
///
/// Returns `None` when a string literal is left unterminated. Text that is
/// already valid JSON comes back unchanged apart from trailing commas.
///
/// ```
/// use lognorm_parser::repair_python_literal;
///
/// let repaired = repair_python_literal("{'ok': True, 'note': None,}").unwrap();
/// assert_eq!(repaired, r#"{"ok": true, "note": null}"#);
/// ```
pub fn repair_python_literal(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\'' | '"' => {
                i = copy_string(&chars, i, &mut out)?;
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(',');
                }
                i += 1;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                out.push_str(match word.as_str() {
                    "True" => "true",
                    "False" => "false",
                    "None" => "null",
                    other => other,
                });
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    Some(out)
}

/// Copy a quoted literal starting at `start` as a JSON string
///
/// Returns the index just past the closing quote.
fn copy_string(chars: &[char], start: usize, out: &mut String) -> Option<usize> {
    let quote = chars[start];
    let mut i = start + 1;
    out.push('"');

    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            let escaped = *chars.get(i + 1)?;
            if escaped == '\'' {
                // \' is not a JSON escape
                out.push('\'');
            } else {
                out.push('\\');
                out.push(escaped);
            }
            i += 2;
            continue;
        }
        if c == quote {
            out.push('"');
            return Some(i + 1);
        }
        match c {
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if u32::from(c) < 0x20 => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            _ => out.push(c),
        }
        i += 1;
    }

    None
}

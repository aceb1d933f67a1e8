use crate::doc::model::{Document, Line};

/// Flatten a [`Document`] back into config text.
///
/// Named sections emit `[name]\n`; blanks emit `\n`; comments re-emit
/// their raw text; properties emit canonical `key=value`. The result is
/// trimmed of trailing whitespace and ends with exactly one `\n`.
pub fn serialize_document(doc: &Document) -> String {
    let mut out = String::new();

    for section in &doc.sections {
        if !section.name.is_empty() {
            out.push('[');
            out.push_str(&section.name);
            out.push_str("]\n");
        }
        for line in &section.lines {
            match line {
                Line::Blank { .. } => out.push('\n'),
                Line::Comment { raw } => {
                    if raw.is_empty() {
                        out.push(';');
                    } else {
                        out.push_str(raw);
                    }
                    out.push('\n');
                }
                Line::Property { key, value, .. } => {
                    out.push_str(key);
                    out.push('=');
                    out.push_str(value);
                    out.push('\n');
                }
            }
        }
    }

    let mut text = out.trim_end().to_string();
    text.push('\n');
    text
}

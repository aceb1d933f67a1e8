use crate::doc::model::{Document, Line, Section};

/// Parse raw config text into a lossless [`Document`].
///
/// Total: there is no malformed input, every string produces a valid
/// document. Lines are split on `\n` with a trailing `\r` stripped before
/// classification. Classification order per line: section header, blank,
/// comment, property. A property splits on the first `=` only; with no
/// `=` the whole trimmed line is the key and the value is empty.
pub fn parse_document(text: &str) -> Document {
    let mut doc = Document::new();
    let mut current = Section::new("");

    for raw_line in text.split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let trimmed = line.trim();

        if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
            commit(&mut doc, &mut current);
            current = Section::new(&trimmed[1..trimmed.len() - 1]);
            continue;
        }

        current.push_line(classify(line, trimmed));
    }

    commit(&mut doc, &mut current);
    doc
}

fn classify(line: &str, trimmed: &str) -> Line {
    if trimmed.is_empty() {
        return Line::Blank {
            raw: line.to_string(),
        };
    }
    if trimmed.starts_with(';') || trimmed.starts_with('#') || trimmed.starts_with("//") {
        return Line::Comment {
            raw: line.to_string(),
        };
    }
    match line.split_once('=') {
        Some((key, value)) => Line::Property {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
            raw: line.to_string(),
        },
        None => Line::Property {
            key: trimmed.to_string(),
            value: String::new(),
            raw: line.to_string(),
        },
    }
}

/// Append the accumulated section unless it is the nameless, empty
/// leftover a cleanly-ended file produces.
fn commit(doc: &mut Document, current: &mut Section) {
    if !current.name.is_empty() || !current.lines.is_empty() {
        doc.sections.push(std::mem::take(current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_single_blank_line() {
        let doc = parse_document("");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].name, "");
        assert!(doc.sections[0].lines[0].is_blank());
    }

    #[test]
    fn leading_lines_land_in_nameless_section() {
        let doc = parse_document("; file banner\n[Core]\nkey=value\n");
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].name, "");
        assert!(doc.sections[0].lines[0].is_comment());
        assert_eq!(doc.sections[1].name, "Core");
    }

    #[test]
    fn duplicate_sections_stay_distinct() {
        let doc = parse_document("[A]\nx=1\n[A]\nx=2\n");
        let names: Vec<&str> = doc.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "A"]);
        assert_eq!(doc.sections[0].property("x"), Some("1"));
        assert_eq!(doc.sections[1].property("x"), Some("2"));
    }

    #[test]
    fn comment_markers() {
        let doc = parse_document("[S]\n; semi\n# hash\n// slashes\n");
        let comments = doc.sections[0]
            .lines
            .iter()
            .filter(|l| l.is_comment())
            .count();
        assert_eq!(comments, 3);
    }

    #[test]
    fn property_without_equals_has_empty_value() {
        let doc = parse_document("[S]\nBareFlag\n");
        match &doc.sections[0].lines[0] {
            Line::Property { key, value, .. } => {
                assert_eq!(key, "BareFlag");
                assert_eq!(value, "");
            }
            other => panic!("expected property, got {other:?}"),
        }
    }

    #[test]
    fn splits_on_first_equals_only() {
        let doc = parse_document("[S]\nkey=a=b=c\n");
        match &doc.sections[0].lines[0] {
            Line::Property { key, value, .. } => {
                assert_eq!(key, "key");
                assert_eq!(value, "a=b=c");
            }
            other => panic!("expected property, got {other:?}"),
        }
    }

    #[test]
    fn strips_carriage_returns() {
        let doc = parse_document("[S]\r\nkey=value\r\n");
        assert_eq!(doc.sections[0].name, "S");
        assert_eq!(doc.sections[0].property("key"), Some("value"));
    }

    #[test]
    fn trims_key_and_value_whitespace() {
        let doc = parse_document("[S]\n  key = value  \n");
        assert_eq!(doc.sections[0].property("key"), Some("value"));
    }

    #[test]
    fn clean_eof_adds_no_trailing_section() {
        // Trailing newline produces one final empty split entry, which
        // becomes a blank line in the last real section, not a new one.
        let doc = parse_document("[Only]\nkey=value\n");
        assert_eq!(doc.sections.len(), 1);
        assert!(doc.sections[0].lines.last().unwrap().is_blank());
    }

    #[test]
    fn empty_brackets_header_is_droppable() {
        // "[]" starts a section with an empty name; with no lines it is
        // never committed.
        let doc = parse_document("[]");
        assert!(doc.sections.is_empty());
    }
}

/// An ordered, lossless view of one configuration file.
///
/// Section order matches input order. Duplicate section names are kept as
/// distinct entries; lines that appear before the first `[Header]` live in
/// an implicit leading section whose name is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub sections: Vec<Section>,
}

/// A named group of lines delimited by a `[Header]` line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Text between `[` and `]`, or empty for the implicit pre-header section.
    pub name: String,
    pub lines: Vec<Line>,
}

/// One classified line of config text.
///
/// `raw` holds the original line as read (carriage return already
/// stripped). Comments are re-emitted verbatim from `raw`; properties are
/// re-emitted as canonical `key=value`, so inline formatting around the
/// `=` is deliberately not preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Property {
        key: String,
        value: String,
        raw: String,
    },
    Comment {
        raw: String,
    },
    Blank {
        raw: String,
    },
}

impl Line {
    /// A property line with canonical `key=value` raw text.
    pub fn property(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        let raw = format!("{key}={value}");
        Line::Property { key, value, raw }
    }

    /// A comment line; `text` should include its own marker (`;`, `#`, `//`).
    pub fn comment(text: impl Into<String>) -> Self {
        Line::Comment { raw: text.into() }
    }

    pub fn blank() -> Self {
        Line::Blank { raw: String::new() }
    }

    pub fn is_property(&self) -> bool {
        matches!(self, Line::Property { .. })
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Line::Comment { .. })
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Line::Blank { .. })
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new empty section and return a mutable handle to it.
    pub fn add_section(&mut self, name: impl Into<String>) -> &mut Section {
        let index = self.sections.len();
        self.sections.push(Section::new(name));
        &mut self.sections[index]
    }

    /// Insert a section at `index`, shifting later sections down.
    pub fn insert_section(&mut self, index: usize, section: Section) {
        self.sections.insert(index, section);
    }

    /// Remove and return the section at `index`, or `None` if out of range.
    pub fn remove_section(&mut self, index: usize) -> Option<Section> {
        if index < self.sections.len() {
            Some(self.sections.remove(index))
        } else {
            None
        }
    }

    /// First section with the given name, if any.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name == name)
    }

    /// First section with the given name, appending an empty one if absent.
    pub fn section_or_insert(&mut self, name: &str) -> &mut Section {
        if let Some(index) = self.sections.iter().position(|s| s.name == name) {
            return &mut self.sections[index];
        }
        self.add_section(name)
    }
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn push_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn insert_line(&mut self, index: usize, line: Line) {
        self.lines.insert(index, line);
    }

    /// Remove and return the line at `index`, or `None` if out of range.
    pub fn remove_line(&mut self, index: usize) -> Option<Line> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    /// Value of the first property with the given key.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Property { key: k, value, .. } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Update the first property with the given key, or append one.
    pub fn set_property(&mut self, key: &str, new_value: impl Into<String>) {
        let new_value = new_value.into();
        for line in &mut self.lines {
            if let Line::Property { key: k, value, raw } = line {
                if k == key {
                    *value = new_value;
                    *raw = format!("{k}={value}");
                    return;
                }
            }
        }
        self.lines.push(Line::property(key, new_value));
    }

    /// Remove every property with the given key; returns how many were removed.
    pub fn remove_property(&mut self, key: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(
            |line| !matches!(line, Line::Property { key: k, .. } if k == key),
        );
        before - self.lines.len()
    }
}

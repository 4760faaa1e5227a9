//! Iterator that drives [`crate::parse_schema_file`].

use std::str::FromStr;

use crate::ast::{Alias, Category, Declaration, Definition, Enumeration};
use crate::errors::ParseError;

/// Which kind of declaration the current section holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Enums,
    Unions,
    Definitions(Category),
}

pub(crate) struct SchemaIterator<'a> {
    lines: std::str::Lines<'a>,
    /// Current section, switched by `---name---` markers.
    section: Section,
    /// Accumulates multi-line declarations (lines without `;` terminator).
    pending: String,
}

impl<'a> SchemaIterator<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            lines: src.lines(),
            section: Section::Definitions(Category::Types),
            pending: String::new(),
        }
    }

    /// Switches section on a marker line. `None` if `line` is no marker.
    fn handle_separator(&mut self, line: &str) -> Option<Result<(), ParseError>> {
        let marker = line.strip_prefix("---")?.strip_suffix("---")?;
        self.section = match marker {
            "enums" => Section::Enums,
            "unions" => Section::Unions,
            "types" => Section::Definitions(Category::Types),
            "methods" => Section::Definitions(Category::Methods),
            _ => return Some(Err(ParseError::NotImplemented)),
        };
        Some(Ok(()))
    }

    fn parse(&self, raw: &str) -> Result<Declaration, ParseError> {
        match self.section {
            Section::Enums => Enumeration::from_str(raw).map(Declaration::Enum),
            Section::Unions => Alias::from_str(raw).map(Declaration::Alias),
            Section::Definitions(category) => Definition::from_str(raw).map(|mut d| {
                d.category = category;
                Declaration::Definition(d)
            }),
        }
    }
}

impl Iterator for SchemaIterator<'_> {
    type Item = Result<Declaration, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }

            match self.handle_separator(trimmed) {
                Some(Ok(())) => continue,
                Some(Err(e)) => return Some(Err(e)),
                None => {}
            }

            self.pending.push(' ');
            self.pending.push_str(trimmed);

            if !trimmed.ends_with(';') {
                continue;
            }

            let raw = std::mem::take(&mut self.pending);
            let raw = raw.trim().trim_end_matches(';').trim();

            if raw.is_empty() {
                continue;
            }

            return Some(self.parse(raw));
        }
    }
}

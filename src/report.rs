//! Report Module
//! Structured results returned by every action; the GUI decides how to show them.

use serde::Serialize;
use std::fmt;

/// A titled report made of ordered sections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub title: String,
    pub sections: Vec<Section>,
    pub footer: Option<String>,
}

/// One section of a report.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub heading: String,
    pub body: SectionBody,
}

/// Section payload.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum SectionBody {
    Text(String),
    List(Vec<String>),
    /// Two-column key/value table (column name → dtype, value → count, ...).
    Table(Vec<(String, String)>),
    /// Already formatted block, printed verbatim.
    Preformatted(String),
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
            footer: None,
        }
    }

    pub fn section(mut self, heading: impl Into<String>, body: SectionBody) -> Self {
        self.sections.push(Section {
            heading: heading.into(),
            body,
        });
        self
    }

    pub fn text(self, heading: impl Into<String>, text: impl Into<String>) -> Self {
        self.section(heading, SectionBody::Text(text.into()))
    }

    pub fn list(self, heading: impl Into<String>, items: Vec<String>) -> Self {
        self.section(heading, SectionBody::List(items))
    }

    pub fn table(self, heading: impl Into<String>, rows: Vec<(String, String)>) -> Self {
        self.section(heading, SectionBody::Table(rows))
    }

    pub fn preformatted(self, heading: impl Into<String>, block: impl Into<String>) -> Self {
        self.section(heading, SectionBody::Preformatted(block.into()))
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Find a section by heading.
    pub fn get_section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }

    /// Pretty JSON form, used for clipboard export.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "-".repeat(40))?;

        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}:", section.heading)?;
            match &section.body {
                SectionBody::Text(text) => writeln!(f, "{}", text)?,
                SectionBody::List(items) => {
                    if items.is_empty() {
                        writeln!(f, "  (none)")?;
                    }
                    for item in items {
                        writeln!(f, "  {}", item)?;
                    }
                }
                SectionBody::Table(rows) => {
                    let width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
                    for (key, value) in rows {
                        writeln!(f, "  {:<width$}  {}", key, value, width = width)?;
                    }
                }
                SectionBody::Preformatted(block) => writeln!(f, "{}", block)?,
            }
        }

        if let Some(footer) = &self.footer {
            writeln!(f)?;
            writeln!(f, "{}", footer)?;
        }
        Ok(())
    }
}

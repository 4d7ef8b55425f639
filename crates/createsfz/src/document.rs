//! Structured SFZ output.
//!
//! The generated instrument is kept as a list of sections and comments until
//! it is rendered, so the region layout can be inspected without re-parsing
//! text.
//!
//! # SFZ Hierarchy
//!
//! Only the headers we generate are modelled:
//!
//! - `<control>`: settings for the whole file, such as `default_path`
//! - `<global>`: settings for every region that follows; we open one per note
//! - `<group>`: settings shared by a velocity layer's round-robin regions
//! - `<region>`: a single sample
//!
//! Opcodes cascade down this hierarchy, so a `<region>` inherits the key range
//! of the `<global>` above it and the velocity range of its `<group>`.

use std::fmt;

/// Banner written before the instrument.
pub const HEADER: &str = "//\n// SFZ file created by createsfz.\n//";

/// Banner written after the instrument.
pub const FOOTER: &str = "//\n// End of SFZ file created by createsfz.\n//";

/// Types of sections we emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SfzSectionType {
    /// `<control>` section
    Control,
    /// `<global>` section
    Global,
    /// `<group>` section
    Group,
    /// `<region>` section
    Region,
}

impl SfzSectionType {
    /// The header text, including angle brackets
    pub fn header(self) -> &'static str {
        match self {
            SfzSectionType::Control => "<control>",
            SfzSectionType::Global => "<global>",
            SfzSectionType::Group => "<group>",
            SfzSectionType::Region => "<region>",
        }
    }
}

/// A section header followed by its opcodes, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct SfzSection {
    /// The type of this section
    pub section_type: SfzSectionType,
    /// Opcode/value pairs
    pub opcodes: Vec<(String, String)>,
}

impl SfzSection {
    /// Creates a new section with no opcodes
    pub fn new(section_type: SfzSectionType) -> Self {
        Self {
            section_type,
            opcodes: Vec::new(),
        }
    }

    /// Append an opcode, builder style
    pub fn with(mut self, opcode: &str, value: impl ToString) -> Self {
        self.set(opcode, value);
        self
    }

    /// Append an opcode
    pub fn set(&mut self, opcode: &str, value: impl ToString) {
        self.opcodes.push((opcode.to_string(), value.to_string()));
    }

    /// Get an opcode value as a string
    pub fn get_opcode_str(&self, name: &str) -> Option<&str> {
        self.opcodes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get an opcode value parsed as an integer
    pub fn get_opcode_i64(&self, name: &str) -> Option<i64> {
        self.get_opcode_str(name)?.parse().ok()
    }
}

impl fmt::Display for SfzSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.section_type.header())?;
        for (opcode, value) in &self.opcodes {
            writeln!(f, "{}={}", opcode, value)?;
        }
        Ok(())
    }
}

/// One item of the output, in file order.
#[derive(Debug, Clone, PartialEq)]
pub enum SfzItem {
    /// A `//` comment line
    Comment(String),
    /// An empty line
    Blank,
    /// A section
    Section(SfzSection),
}

/// A complete generated SFZ file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SfzDocument {
    /// Contents between the header and footer banners
    pub items: Vec<SfzItem>,
}

impl SfzDocument {
    /// Creates an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section
    pub fn push_section(&mut self, section: SfzSection) {
        self.items.push(SfzItem::Section(section));
    }

    /// Append a comment line
    pub fn push_comment(&mut self, comment: impl Into<String>) {
        self.items.push(SfzItem::Comment(comment.into()));
    }

    /// Append an empty line
    pub fn push_blank(&mut self) {
        self.items.push(SfzItem::Blank);
    }

    /// All sections, in file order
    pub fn sections(&self) -> impl Iterator<Item = &SfzSection> {
        self.items.iter().filter_map(|item| match item {
            SfzItem::Section(section) => Some(section),
            _ => None,
        })
    }

    /// Sections of one type, in file order
    pub fn sections_of(&self, section_type: SfzSectionType) -> impl Iterator<Item = &SfzSection> {
        self.sections()
            .filter(move |section| section.section_type == section_type)
    }

    /// Get the default path from the control section if available
    pub fn get_default_path(&self) -> Option<&str> {
        self.sections_of(SfzSectionType::Control)
            .find_map(|control| control.get_opcode_str("default_path"))
    }

    /// Render the document as SFZ text
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SfzDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HEADER)?;
        for item in &self.items {
            match item {
                SfzItem::Comment(text) => writeln!(f, "// {}", text)?,
                SfzItem::Blank => writeln!(f)?,
                SfzItem::Section(section) => write!(f, "{}", section)?,
            }
        }
        writeln!(f, "{}", FOOTER)
    }
}

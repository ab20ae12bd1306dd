use {
    crate::PixelGrid,
    std::{fmt, str::FromStr},
};

/// Name of the emitted constant. Always a plain identifier, so it needs no
/// escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label(String);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("label is empty")]
    Empty,
    #[error("label {0:?} is not an identifier")]
    NotIdentifier(String),
}

impl Label {
    pub const DEFAULT: &'static str = "STACK_ATTACK_LOGO";

    pub fn new(name: &str) -> Result<Label, LabelError> {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {return Err(LabelError::Empty)};
        let head_ok = first.is_ascii_alphabetic() || first == '_' || first == '$';
        let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if !(head_ok && tail_ok) {return Err(LabelError::NotIdentifier(name.to_owned()))}
        Ok(Label(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Label {
    fn default() -> Self { Label(Self::DEFAULT.to_owned()) }
}

impl FromStr for Label {
    type Err = LabelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Label::new(s) }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Form {
    /// `const LABEL = { pixels: [...] };`
    Named(Label),
    /// Bare nested array.
    Compact,
}

impl Default for Form {
    fn default() -> Self { Form::Named(Label::default()) }
}

impl Form {
    pub fn render(&self, grid: &PixelGrid) -> String {
        match self {
            Form::Named(label) => format_named(grid, label),
            Form::Compact      => format_compact(grid),
        }
    }
}

fn write_rows(out: &mut String, indent: &str, grid: &PixelGrid) {
    for row in grid.rows() {
        out.push_str(indent);
        out.push('[');
        for (i, &v) in row.iter().enumerate() {
            if i != 0 {out.push(',')}
            // cells are 0 or 1
            out.push(char::from(b'0' + v));
        }
        out.push_str("],\n");
    }
}

pub fn format_named(grid: &PixelGrid, label: &Label) -> String {
    let mut out = String::with_capacity(grid.total() * 2 + grid.high() * 8 + 64);
    out.push_str("const ");
    out.push_str(label.as_str());
    out.push_str(" = {\n");
    out.push_str("  pixels: [\n");
    write_rows(&mut out, "    ", grid);
    out.push_str("  ],\n");
    out.push_str("};");
    out
}

pub fn format_compact(grid: &PixelGrid) -> String {
    let mut out = String::with_capacity(grid.total() * 2 + grid.high() * 6 + 4);
    out.push_str("[\n");
    write_rows(&mut out, "  ", grid);
    out.push(']');
    out
}

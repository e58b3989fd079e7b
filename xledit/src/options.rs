//! Options controlling how documents are written back out.

/// Write behavior options shared by every format's exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Indent nested elements with tabs instead of spaces.
    pub use_tabs: bool,
    /// Number of spaces per nesting level when `use_tabs` is off.
    pub indent_width: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            use_tabs: false,
            indent_width: 2,
        }
    }
}

impl ExportOptions {
    /// Creates default export options (two-space indentation).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables tab indentation.
    pub fn with_tabs(mut self, use_tabs: bool) -> Self {
        self.use_tabs = use_tabs;
        self
    }

    /// Sets the number of spaces per level.
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    /// Byte repeated for each indentation level.
    pub fn indent_char(&self) -> u8 {
        if self.use_tabs { b'\t' } else { b' ' }
    }

    /// How many times [`Self::indent_char`] is repeated per level.
    pub fn indent_size(&self) -> usize {
        if self.use_tabs { 1 } else { self.indent_width }
    }

    /// One level of indentation as a string.
    pub fn indent_unit(&self) -> String {
        String::from(self.indent_char() as char).repeat(self.indent_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_indent() {
        let options = ExportOptions::new();
        assert_eq!(options.indent_unit(), "  ");
    }

    #[test]
    fn test_tabs_ignore_width() {
        let options = ExportOptions::new().with_indent_width(4).with_tabs(true);
        assert_eq!(options.indent_char(), b'\t');
        assert_eq!(options.indent_unit(), "\t");

        let options = options.with_tabs(false);
        assert_eq!(options.indent_unit(), "    ");
    }
}

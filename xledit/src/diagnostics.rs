//! Non-fatal import diagnostics.
//!
//! A [`Warning`] describes something the importer fixed up on its own (a renamed
//! duplicate, a fallback source text). Warnings never travel inside the parsed value:
//! they are collected next to it and mirrored to the `tracing` log as they happen.

use std::fmt::Display;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A sibling with the same identifier already existed; the entity was renamed.
    DuplicateIdentifier { path: String, renamed_to: String },

    /// A derived-locale flat file was imported before its baseline; the key was used
    /// as source text.
    MissingBaseline { file: String, key: String },
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::DuplicateIdentifier { path, renamed_to } => {
                write!(f, "{} already exists, renamed to {}", path, renamed_to)
            }
            Warning::MissingBaseline { file, key } => write!(
                f,
                "{}: no baseline file loaded, using key `{}` as source text",
                file, key
            ),
        }
    }
}

/// Collects warnings raised while importing a single input.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning and logs it.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Appends warnings that were already logged when they were raised.
    pub fn extend(&mut self, warnings: impl IntoIterator<Item = Warning>) {
        self.warnings.extend(warnings);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let warning = Warning::DuplicateIdentifier {
            path: "menu/open".to_string(),
            renamed_to: "open-XL-DUPLICATED".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "menu/open already exists, renamed to open-XL-DUPLICATED"
        );

        let warning = Warning::MissingBaseline {
            file: "fr_fr".to_string(),
            key: "menu.title".to_string(),
        };
        assert!(warning.to_string().contains("`menu.title`"));
    }

    #[test]
    fn test_diagnostics_collects_in_order() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        diagnostics.warn(Warning::MissingBaseline {
            file: "de_de".to_string(),
            key: "a".to_string(),
        });
        diagnostics.warn(Warning::MissingBaseline {
            file: "de_de".to_string(),
            key: "b".to_string(),
        });

        let keys: Vec<_> = diagnostics
            .into_warnings()
            .into_iter()
            .map(|w| match w {
                Warning::MissingBaseline { key, .. } => key,
                Warning::DuplicateIdentifier { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}

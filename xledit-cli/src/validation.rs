use std::{path::Path, str::FromStr};
use unic_langid::LanguageIdentifier;
use xledit::FormatType;

/// Validation context for different command types
#[derive(Debug, Default)]
pub struct ValidationContext {
    pub input_files: Vec<String>,
    pub output_file: Option<String>,
    pub language_code: Option<String>,
    pub output_format: Option<String>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_file(mut self, file: String) -> Self {
        self.input_files.push(file);
        self
    }

    pub fn with_output_file(mut self, file: String) -> Self {
        self.output_file = Some(file);
        self
    }

    pub fn with_language_code(mut self, lang: String) -> Self {
        self.language_code = Some(lang);
        self
    }

    pub fn with_output_format(mut self, format: String) -> Self {
        self.output_format = Some(format);
        self
    }
}

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    if path.trim().is_empty() {
        return Err("Output path cannot be empty".to_string());
    }

    let path_obj = Path::new(path);
    if let Some(parent) = path_obj.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Cannot create output directory: {}", e))?;
        }
    }

    Ok(())
}

/// Validate language code format using unic-langid
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    match lang.parse::<LanguageIdentifier>() {
        Ok(_) => Ok(()),
        Err(_) => Err(format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )),
    }
}

/// Validate format string
pub fn validate_format(format: &str) -> Result<FormatType, String> {
    if format.trim().is_empty() {
        return Err("Format cannot be empty".to_string());
    }

    FormatType::from_str(format).map_err(|_| {
        format!(
            "Unsupported format: {}. Supported formats: xliff, json",
            format
        )
    })
}

/// Validate a complete validation context
pub fn validate_context(context: &ValidationContext) -> Result<(), String> {
    if context.input_files.is_empty() {
        return Err("At least one input file is required".to_string());
    }

    for (i, input) in context.input_files.iter().enumerate() {
        validate_file_path(input)
            .map_err(|e| format!("Input file {} validation failed: {}", i + 1, e))?;
    }

    if let Some(ref output) = context.output_file {
        validate_output_path(output).map_err(|e| format!("Output validation failed: {}", e))?;
    }

    if let Some(ref lang) = context.language_code {
        validate_language_code(lang)
            .map_err(|e| format!("Language code validation failed: {}", e))?;
    }

    if let Some(ref format) = context.output_format {
        validate_format(format).map_err(|e| format!("Output format validation failed: {}", e))?;
    }

    Ok(())
}

/// Normalizes a language code for comparison: `pt_br` and `PT-BR` compare equal.
pub fn normalize_lang(lang: &str) -> String {
    lang.trim().replace('_', "-").to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language_code() {
        assert!(validate_language_code("en").is_ok());
        assert!(validate_language_code("fr-FR").is_ok());
        assert!(validate_language_code("zh-Hans").is_ok());
        assert!(validate_language_code("").is_err());
        assert!(validate_language_code("not a language").is_err());
    }

    #[test]
    fn test_validate_format() {
        assert_eq!(validate_format("xlf").unwrap(), FormatType::Xliff12);
        assert_eq!(validate_format(" json ").unwrap(), FormatType::FlatJson);
        assert!(validate_format("").is_err());
        assert!(validate_format("android").unwrap_err().contains("xliff, json"));
    }

    #[test]
    fn test_validate_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.xlf");
        std::fs::write(&file, "x").unwrap();

        assert!(validate_file_path(file.to_str().unwrap()).is_ok());
        assert!(validate_file_path(dir.path().to_str().unwrap()).is_err());
        assert!(validate_file_path("/no/such/file.xlf").is_err());
    }

    #[test]
    fn test_validate_output_path_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("out.xlf");
        validate_output_path(output.to_str().unwrap()).unwrap();
        assert!(dir.path().join("nested").is_dir());
        assert!(validate_output_path("out.xlf").is_ok());
        assert!(validate_output_path("  ").is_err());
    }

    #[test]
    fn test_validate_context_requires_inputs() {
        let error = validate_context(&ValidationContext::new()).unwrap_err();
        assert!(error.contains("input file"));

        let error = validate_context(
            &ValidationContext::new()
                .with_input_file("/no/such.xlf".to_string())
                .with_language_code("fr".to_string()),
        )
        .unwrap_err();
        assert!(error.starts_with("Input file 1 validation failed"));
    }

    #[test]
    fn test_normalize_lang() {
        assert_eq!(normalize_lang("pt_BR"), "pt-br");
        assert_eq!(normalize_lang(" EN-us "), "en-us");
    }
}

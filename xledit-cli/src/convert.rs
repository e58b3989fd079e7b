use std::path::Path;

use xledit::{Codec, ExportOptions, FormatType, TranslationFile, infer_format_from_extension};
use xledit_cli::validation::{
    ValidationContext, normalize_lang, validate_context, validate_format,
};

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Input files, imported in order. Baseline files go first.
    pub inputs: Vec<String>,
    /// Flat JSON baseline read ahead of `inputs`.
    pub baseline: Option<String>,
    pub output: String,
    /// Output format; inferred from the output extension when absent.
    pub output_format: Option<String>,
    /// Only export the file(s) in this language.
    pub lang: Option<String>,
    pub tabs: bool,
    pub indent: usize,
}

/// Input list with the baseline, if any, in front.
pub fn with_baseline(baseline: &Option<String>, inputs: &[String]) -> Vec<String> {
    baseline
        .iter()
        .chain(inputs.iter().filter(|input| Some(*input) != baseline.as_ref()))
        .cloned()
        .collect()
}

/// Reads every input into one codec, printing import warnings to stderr.
pub fn read_inputs(inputs: &[String]) -> Result<Codec, String> {
    let mut codec = Codec::new();
    for input in inputs {
        let format = codec
            .read_file(input)
            .map_err(|e| format!("Error reading {}: {}", input, e))?;
        tracing::debug!("{} read as {}", input, format);
        for warning in codec.take_warnings() {
            eprintln!("⚠️  {}: {}", input, warning);
        }
    }
    Ok(codec)
}

/// Files whose text is in `lang`, or every file when no language is given.
pub fn select_files(codec: &Codec, lang: &Option<String>) -> Result<Vec<TranslationFile>, String> {
    let selected: Vec<TranslationFile> = match lang {
        Some(lang) => codec
            .iter()
            .filter(|file| normalize_lang(file.effective_language()) == normalize_lang(lang))
            .cloned()
            .collect(),
        None => codec.files.clone(),
    };

    if selected.is_empty() {
        return Err(match lang {
            Some(lang) => format!("Language '{}' not found in input files", lang),
            None => "Input files contain no translation files".to_string(),
        });
    }
    Ok(selected)
}

fn resolve_output_format(output: &str, explicit: &Option<String>) -> Result<FormatType, String> {
    match explicit {
        Some(format) => validate_format(format),
        None => infer_format_from_extension(output)
            .ok_or_else(|| format!("Cannot infer format from path: {}", output)),
    }
}

pub fn run_convert_command(options: ConvertOptions) -> Result<(), String> {
    let inputs = with_baseline(&options.baseline, &options.inputs);
    let mut context = ValidationContext::new().with_output_file(options.output.clone());
    for input in &inputs {
        context = context.with_input_file(input.clone());
    }
    if let Some(lang) = &options.lang {
        context = context.with_language_code(lang.clone());
    }
    if let Some(format) = &options.output_format {
        context = context.with_output_format(format.clone());
    }
    validate_context(&context)?;

    let format = resolve_output_format(&options.output, &options.output_format)?;
    let codec = read_inputs(&inputs)?;
    let files = select_files(&codec, &options.lang)?;

    if format == FormatType::FlatJson {
        let mut languages: Vec<&str> = files.iter().map(|f| f.effective_language()).collect();
        languages.sort_unstable();
        languages.dedup();
        if languages.len() > 1 {
            return Err(format!(
                "Multiple languages present ({}); specify --lang",
                languages.join(", ")
            ));
        }
    }

    let export_options = ExportOptions::new()
        .with_tabs(options.tabs)
        .with_indent_width(options.indent);
    let text = codec
        .export_files(&files, format, &export_options)
        .map_err(|e| format!("Error converting to {}: {}", format, e))?;
    std::fs::write(Path::new(&options.output), text)
        .map_err(|e| format!("Error writing {}: {}", options.output, e))?;

    println!(
        "✅ Converted {} file(s) to {} ({})",
        files.len(),
        options.output,
        format.name()
    );
    Ok(())
}

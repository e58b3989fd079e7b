use std::path::Path;

use crate::convert::read_inputs;
use serde_json::json;
use unic_langid::LanguageIdentifier;
use xledit::{
    Codec, ExportOptions, SyncReport, infer_format_from_extension, sync_structure, types,
};
use xledit_cli::validation::{validate_file_path, validate_output_path};

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub source: String,
    pub target: String,
    /// Language of the target to create when the target file is missing.
    pub lang: Option<String>,
    pub output: Option<String>,
    pub report_json: Option<String>,
    pub dry_run: bool,
}

fn write_report(path: &str, options: &SyncOptions, reports: &[(String, SyncReport)]) -> Result<(), String> {
    let payload = json!({
        "source": options.source,
        "target": options.target,
        "output": options.output,
        "dry_run": options.dry_run,
        "files": reports
            .iter()
            .map(|(language, report)| json!({ "language": language, "summary": report }))
            .collect::<Vec<_>>(),
    });

    let text = serde_json::to_string_pretty(&payload)
        .map_err(|e| format!("Failed to serialize report JSON: {}", e))?;
    std::fs::write(path, text).map_err(|e| format!("Failed to write report JSON '{}': {}", path, e))
}

/// Adds a fresh `lang` translation of every source file in `codec`.
fn create_targets(codec: &mut Codec, lang: &str) -> Result<usize, String> {
    let lang = lang
        .parse::<LanguageIdentifier>()
        .map_err(|_| format!("Invalid language code format: {}", lang))?
        .to_string();
    let created: Vec<_> = codec
        .iter()
        .filter(|file| file.is_source())
        .map(|file| file.derive(lang.clone()))
        .collect();

    let count = created.len();
    for file in created {
        codec.add_file(file);
    }
    Ok(count)
}

/// Brings the structure of every file in `target` in line with `source`.
pub fn run_sync_command(opts: SyncOptions) -> Result<(), String> {
    validate_file_path(&opts.source)?;
    let create = !Path::new(&opts.target).exists();
    if create && opts.lang.is_none() {
        return Err(format!(
            "File does not exist: {} (pass --lang to create it)",
            opts.target
        ));
    }
    if !create {
        validate_file_path(&opts.target)?;
    }
    if let Some(output) = &opts.output {
        validate_output_path(output)?;
    }
    if let Some(report_path) = &opts.report_json {
        validate_output_path(report_path)?;
    }

    let out = opts.output.clone().unwrap_or_else(|| opts.target.clone());
    let format = infer_format_from_extension(&out)
        .ok_or_else(|| format!("Cannot infer format from path: {}", out))?;

    // Reading the source first lets flat JSON translations find their baseline.
    let mut codec = read_inputs(std::slice::from_ref(&opts.source))?;
    let source_count = codec.files.len();
    match opts.lang.as_deref().filter(|_| create) {
        Some(lang) => {
            let count = create_targets(&mut codec, lang)?;
            println!("Created {} translation file(s) for {}", count, lang);
        }
        None => {
            codec
                .read_file(&opts.target)
                .map_err(|e| format!("Error reading {}: {}", opts.target, e))?;
            for warning in codec.take_warnings() {
                eprintln!("⚠️  {}: {}", opts.target, warning);
            }
        }
    }
    if codec.files.len() == source_count {
        return Err(format!("Target '{}' contains no translation files", opts.target));
    }

    let (sources, targets) = codec.files.split_at_mut(source_count);
    let mut reports = Vec::new();
    for target in targets.iter_mut() {
        let origin = types::originating_file(sources, target)
            .or_else(|| (sources.len() == 1).then(|| &sources[0]))
            .ok_or_else(|| {
                format!(
                    "No source file in '{}' matches source language {}",
                    opts.source, target.source_language
                )
            })?;
        let report = sync_structure(origin, target);
        println!("{}: {}", target.effective_language(), report);
        reports.push((target.effective_language().to_string(), report));
    }

    if let Some(report_path) = &opts.report_json {
        write_report(report_path, &opts, &reports)?;
        println!("Report JSON written: {}", report_path);
    }

    if opts.dry_run {
        println!("Dry-run mode: no files were written");
        return Ok(());
    }

    let text = codec
        .export_files(&codec.files[source_count..], format, &ExportOptions::default())
        .map_err(|e| format!("Error writing output: {}", e))?;
    std::fs::write(&out, text).map_err(|e| format!("Error writing {}: {}", out, e))?;
    println!("✅ Sync complete: {}", out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_targets_derives_source_files() {
        let mut codec = Codec::new();
        codec.import_str("en_us", r#"{"a": "A", "b": "B"}"#).unwrap();

        assert_eq!(create_targets(&mut codec, "fr-FR").unwrap(), 1);
        let created = &codec.files[1];
        assert_eq!(created.source_language, "en-US");
        assert_eq!(created.target_language.as_deref(), Some("fr-FR"));
        assert_eq!(created.unit_count(), 2);
        assert!(created.root.units.iter().all(|unit| unit.target.is_none()));

        assert!(create_targets(&mut codec, "not a language").is_err());
    }
}

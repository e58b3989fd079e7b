use xledit::{
    Codec,
    tree::{self, Node},
};
use xledit_cli::validation::normalize_lang;

const PREVIEW_CHARS: usize = 50;

fn preview(text: &str, full: bool) -> String {
    if full || text.chars().count() <= PREVIEW_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", truncated)
    }
}

/// Print a view of the files in a codec, one group per block.
///
/// Stops after `limit` units when a limit is given.
pub fn print_view(
    codec: &Codec,
    lang_filter: &Option<String>,
    full: bool,
    limit: Option<usize>,
) -> Result<(), String> {
    if limit == Some(0) {
        return Err("--limit must be at least 1".to_string());
    }

    let files: Vec<_> = codec
        .iter()
        .filter(|file| match lang_filter {
            Some(lang) => normalize_lang(file.effective_language()) == normalize_lang(lang),
            None => true,
        })
        .collect();

    if files.is_empty() {
        return Err(match lang_filter {
            Some(lang) => format!("No files found for language: {}", lang),
            None => "No files found".to_string(),
        });
    }

    let mut printed = 0usize;
    let reached = |printed: usize| limit.is_some_and(|limit| printed >= limit);
    for (i, file) in files.iter().enumerate() {
        println!("\n=== File {} ===", i + 1);
        println!("Name: {}", file.filename);
        println!("Original: {}", file.original);
        match &file.target_language {
            Some(target) => println!("Languages: {} → {}", file.source_language, target),
            None => println!("Language: {}", file.source_language),
        }
        println!("Units: {}", file.unit_count());

        let mut walk = tree::walk(&file.root);
        while let Some(step) = walk.next() {
            if !step.group.is_root {
                println!("\n  [{}]", step.group.path.join("/"));
            }
            for node in step.nodes {
                let Node::Unit(unit) = node else { continue };
                println!("\n  Unit: {}", unit.full_path_str());
                println!("    Status: {}", unit.translation_status());
                println!("    Source: {}", preview(unit.source_text(), full));
                if let Some(target) = unit.target_text() {
                    println!("    Target: {}", preview(target, full));
                }
                for note in unit.sorted_notes() {
                    println!("    Note: {}", preview(&note.content, full));
                }

                printed += 1;
                if reached(printed) {
                    walk.cancel();
                    break;
                }
            }
        }
        if reached(printed) {
            println!("\n(stopped after {} unit(s))", printed);
            break;
        }
    }
    Ok(())
}

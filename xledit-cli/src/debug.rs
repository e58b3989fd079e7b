use crate::convert::read_inputs;
use serde_json::json;
use std::fs::File;
use std::io::Write;

/// Run the debug command: read localization files and output the parsed model as JSON.
pub fn run_debug_command(inputs: Vec<String>, output: Option<String>) -> Result<(), String> {
    for input in &inputs {
        xledit_cli::validation::validate_file_path(input)?;
    }

    let codec = read_inputs(&inputs)?;
    let json = serde_json::to_string_pretty(&json!({ "files": codec.files }))
        .map_err(|e| format!("Error serializing to JSON: {}", e))?;

    match output {
        Some(output_path) => {
            File::create(&output_path)
                .and_then(|mut f| f.write_all(json.as_bytes()))
                .map_err(|e| format!("Error writing to {}: {}", output_path, e))?;
            println!("✅ Debug output written to: {}", output_path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

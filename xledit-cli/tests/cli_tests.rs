use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn xledit_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("xledit"))
}

const SOURCE_XLIFF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2" xmlns="urn:oasis:names:tc:xliff:document:1.2">
  <file original="menu" source-language="en-US" target-language="de-DE" datatype="plaintext">
    <body>
      <group id="menu">
        <trans-unit id="open">
          <source>Open</source>
          <target>Öffnen</target>
        </trans-unit>
        <trans-unit id="close">
          <source>Close &amp; quit</source>
        </trans-unit>
      </group>
      <trans-unit id="title">
        <source>Editor</source>
        <target></target>
      </trans-unit>
    </body>
  </file>
</xliff>
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_convert_xliff_to_json() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "menu.xlf", SOURCE_XLIFF);
    let output = dir.path().join("de_de.json");

    let result = xledit_cmd()
        .args(["convert", "-i", &input, "-o", output.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    // Only non-empty targets are written for a translated file.
    assert_eq!(json, serde_json::json!({ "menu.open": "Öffnen" }));
}

#[test]
fn test_convert_json_baseline_and_translation_to_xliff() {
    let dir = TempDir::new().unwrap();
    let baseline = write(&dir, "en_us.json", r#"{"block.stone": "Stone", "item.stick": "Stick"}"#);
    let translated = write(&dir, "fr_fr.json", r#"{"block.stone": "Pierre"}"#);
    let output = dir.path().join("fr.xlf");

    let result = xledit_cmd()
        .args([
            "convert",
            "-i",
            &baseline,
            &translated,
            "-o",
            output.to_str().unwrap(),
            "--lang",
            "fr-FR",
        ])
        .output()
        .unwrap();
    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains(r#"source-language="en-US""#));
    assert!(xml.contains(r#"target-language="fr-FR""#));
    assert!(xml.contains("<source>Stone</source>"));
    assert!(xml.contains(r#"<trans-unit id="block.stone">"#));
    assert!(xml.contains("<target>Pierre</target>"));
    // Keys the translation lacks are not part of the translated file.
    assert!(!xml.contains("Stick"));
}

#[test]
fn test_convert_json_requires_single_language() {
    let dir = TempDir::new().unwrap();
    let baseline = write(&dir, "en_us.json", r#"{"a": "A"}"#);
    let translated = write(&dir, "de_de.json", r#"{"a": "Ä"}"#);
    let output = dir.path().join("out.json");

    let result = xledit_cmd()
        .args(["convert", "-i", &baseline, &translated, "-o", output.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("specify --lang"));
    assert!(!output.exists());
}

#[test]
fn test_convert_rejects_unrecognized_input() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "notes.txt", "just some text");
    let output = dir.path().join("out.xlf");

    let result = xledit_cmd()
        .args(["convert", "-i", &input, "-o", output.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("xliff: "), "stderr: {}", stderr);
    assert!(stderr.contains("json: "), "stderr: {}", stderr);
}

#[test]
fn test_convert_rejects_newer_xliff() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "new.xlf",
        r#"<xliff version="2.0" xmlns="urn:oasis:names:tc:xliff:document:2.0"></xliff>"#,
    );
    let output = dir.path().join("out.json");

    let result = xledit_cmd()
        .args(["convert", "-i", &input, "-o", output.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("2.0"));
}

#[test]
fn test_convert_missing_input_fails() {
    let result = xledit_cmd()
        .args(["convert", "-i", "does/not/exist.xlf", "-o", "out.json"])
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("File does not exist"));
}

#[test]
fn test_convert_reports_duplicate_ids() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "dup.xlf",
        r#"<xliff version="1.2"><file original="f" source-language="en" datatype="plaintext"><body>
<trans-unit id="a"><source>One</source></trans-unit>
<trans-unit id="a"><source>Two</source></trans-unit>
</body></file></xliff>"#,
    );
    let output = dir.path().join("out.xlf");

    let result = xledit_cmd()
        .args(["convert", "-i", &input, "-o", output.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("a-XL-DUPLICATED"));
    assert!(fs::read_to_string(&output).unwrap().contains(r#"id="a-XL-DUPLICATED""#));
}

#[test]
fn test_view_lists_units() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "menu.xlf", SOURCE_XLIFF);

    let result = xledit_cmd().args(["view", "-i", &input]).output().unwrap();
    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Languages: en-US → de-DE"));
    assert!(stdout.contains("[menu]"));
    assert!(stdout.contains("Unit: menu/open"));
    assert!(stdout.contains("Target: Öffnen"));
    assert!(stdout.contains("Source: Close & quit"));
}

#[test]
fn test_view_limit_stops_early() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "menu.xlf", SOURCE_XLIFF);

    let result = xledit_cmd()
        .args(["view", "-i", &input, "--limit", "1"])
        .output()
        .unwrap();
    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert_eq!(stdout.matches("Unit: ").count(), 1);
    assert!(stdout.contains("stopped after 1 unit(s)"));
}

#[test]
fn test_view_unknown_language_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "menu.xlf", SOURCE_XLIFF);

    let result = xledit_cmd()
        .args(["view", "-i", &input, "--lang", "ja"])
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("No files found for language: ja"));
}

#[test]
fn test_debug_dumps_model() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "menu.xlf", SOURCE_XLIFF);
    let output = dir.path().join("model.json");

    let result = xledit_cmd()
        .args(["debug", "-i", &input, "-o", output.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(result.status.success());

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let file = &json["files"][0];
    assert_eq!(file["source_language"], "en-US");
    assert_eq!(file["target_language"], "de-DE");
    assert_eq!(file["root"]["groups"][0]["id"], "menu");
}

#[test]
fn test_sync_adds_missing_keys() {
    let dir = TempDir::new().unwrap();
    let source = write(
        &dir,
        "en_us.json",
        r#"{"block.stone": "Stone", "block.dirt": "Dirt", "item.stick": "Stick"}"#,
    );
    let target = write(&dir, "es_es.json", r#"{"block.stone": "Piedra", "old.key": "Viejo"}"#);
    let report = dir.path().join("report.json");
    let output = dir.path().join("es_es.xlf");

    let result = xledit_cmd()
        .args([
            "sync",
            "-s",
            &source,
            "-t",
            &target,
            "-o",
            output.to_str().unwrap(),
            "--report-json",
            report.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    let summary = &report["files"][0]["summary"];
    assert_eq!(report["files"][0]["language"], "es-ES");
    assert_eq!(summary["units_added"], 2);
    assert_eq!(summary["orphaned_units"], 1);
    assert_eq!(summary["units_removed"], 0);
    assert_eq!(summary["groups_added"], 0);

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains("<source>Dirt</source>"));
    assert!(xml.contains("<target>Piedra</target>"));
    // Orphaned units are reported, not dropped.
    assert!(xml.contains("<target>Viejo</target>"));
}

#[test]
fn test_sync_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "en_us.json", r#"{"a": "A", "b": "B"}"#);
    let target_content = r#"{"a": "Ä"}"#;
    let target = write(&dir, "de_de.json", target_content);

    let result = xledit_cmd()
        .args(["sync", "-s", &source, "-t", &target, "--dry-run"])
        .output()
        .unwrap();
    assert!(result.status.success());
    assert!(String::from_utf8_lossy(&result.stdout).contains("Dry-run mode"));
    assert_eq!(fs::read_to_string(&target).unwrap(), target_content);
}

#[test]
fn test_sync_creates_missing_target() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "menu.xlf", SOURCE_XLIFF.replace(r#" target-language="de-DE""#, "").as_str());
    let target = dir.path().join("menu.fr.xlf");

    let result = xledit_cmd()
        .args(["sync", "-s", &source, "-t", target.to_str().unwrap(), "--lang", "fr-FR"])
        .output()
        .unwrap();
    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let xml = fs::read_to_string(&target).unwrap();
    assert!(xml.contains(r#"target-language="fr-FR""#));
    assert!(xml.contains(r#"<group id="menu">"#));
    assert!(xml.contains("<source>Close &amp; quit</source>"));
    assert!(!xml.contains("<target>"));
}

#[test]
fn test_sync_missing_target_without_lang_fails() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "en_us.json", r#"{"a": "A"}"#);
    let target = dir.path().join("de_de.json");

    let result = xledit_cmd()
        .args(["sync", "-s", &source, "-t", target.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("--lang"));
}

#[test]
fn test_view_zero_limit_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "menu.xlf", SOURCE_XLIFF);

    let result = xledit_cmd()
        .args(["view", "-i", &input, "--limit", "0"])
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(!String::from_utf8_lossy(&result.stdout).contains("Unit: "));
    assert!(String::from_utf8_lossy(&result.stderr).contains("--limit must be at least 1"));
}

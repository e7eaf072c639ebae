//! Tests for the generate-manifest binary
//!
//! Runs the compiled binary against scratch asset roots.

use std::path::Path;
use std::process::{Command, Output};

use aivr_common::{Label, Manifest};
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), b"x").unwrap();
}

fn run_generator(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_generate-manifest"))
        .args(args)
        .env_remove("AIVR_ROOT_FOLDER")
        .env_remove("AIVR_CONFIG")
        .output()
        .expect("Failed to run generate-manifest")
}

fn read_manifest(root: &Path) -> (String, Manifest) {
    let text = std::fs::read_to_string(root.join("image-manifest.json")).unwrap();
    let manifest = Manifest::from_json(&text).unwrap();
    (text, manifest)
}

#[test]
fn test_generates_sorted_manifest_from_default_dirs() {
    let temp = TempDir::new().unwrap();
    let human = temp.path().join("assets/Art/RealArt");
    let ai = temp.path().join("assets/AiArtData");
    touch(&human, "b.JPG");
    touch(&human, "a photo.png");
    touch(&human, "notes.txt");
    touch(&ai, "z.webp");
    touch(&ai, "m.avif");
    std::fs::create_dir_all(human.join("nested.png")).unwrap();

    let output = run_generator(&[temp.path().to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Generated image-manifest.json (human=2, ai=2)"
    );

    let (text, manifest) = read_manifest(temp.path());
    assert_eq!(
        manifest.paths(Label::Human),
        ["assets/Art/RealArt/a photo.png", "assets/Art/RealArt/b.JPG"]
    );
    assert_eq!(
        manifest.paths(Label::Ai),
        ["assets/AiArtData/m.avif", "assets/AiArtData/z.webp"]
    );
    assert!(text.ends_with("\n"));
    assert!(text.contains("\n  \"human\": ["));
}

#[test]
fn test_custom_dirs_from_flags() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("real"), "h.png");
    touch(&temp.path().join("fake"), "a.png");

    let output = run_generator(&[
        temp.path().to_str().unwrap(),
        "--human-dir",
        "real",
        "--ai-dir",
        "fake",
    ]);

    assert!(output.status.success());
    let (_, manifest) = read_manifest(temp.path());
    assert_eq!(manifest.paths(Label::Human), ["real/h.png"]);
    assert_eq!(manifest.paths(Label::Ai), ["fake/a.png"]);
}

#[test]
fn test_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("assets/RealArt"), "h.png");

    let output = run_generator(&[temp.path().to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Could not find required folders for manifest generation."));
    assert!(!temp.path().join("image-manifest.json").exists());
}

#[test]
fn test_empty_dataset_fails() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("assets/RealArt"), "h.png");
    std::fs::create_dir_all(temp.path().join("assets/AiArtData")).unwrap();
    touch(&temp.path().join("assets/AiArtData"), "readme.md");

    let output = run_generator(&[temp.path().to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Manifest generation failed because one dataset is empty."));
    assert!(!temp.path().join("image-manifest.json").exists());
}

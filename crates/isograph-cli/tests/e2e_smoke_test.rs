use std::{fs, path::PathBuf};

use tempfile::tempdir;

use isograph_cli::{Args, run};

/// Collects all .toml scene files from a directory
fn collect_scene_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn scenes_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenes")
}

fn args_for(input: &PathBuf, output: PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        ticks: 30,
        seed: Some(42),
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_scenes() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_scenes = collect_scene_files(scenes_dir());
    assert!(!valid_scenes.is_empty(), "No valid scenes found in scenes/");

    let mut failed_scenes = Vec::new();

    for scene_path in &valid_scenes {
        let output_path = temp_dir.path().join(format!(
            "{}.svg",
            scene_path.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args_for(scene_path, output_path.clone())) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).expect("Failed to read output");
                assert!(svg.contains("<svg"), "{} produced no SVG", scene_path.display());
                assert!(svg.contains("<path"), "{} drew no connectors", scene_path.display());
            }
            Err(e) => failed_scenes.push((scene_path.clone(), e)),
        }
    }

    if !failed_scenes.is_empty() {
        eprintln!("\nValid scenes that failed:");
        for (path, err) in &failed_scenes {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid scene(s) failed unexpectedly", failed_scenes.len());
    }
}

#[test]
fn e2e_smoke_test_error_scenes() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_scenes = collect_scene_files(scenes_dir().join("errors"));
    assert!(
        !error_scenes.is_empty(),
        "No error scenes found in scenes/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for scene_path in &error_scenes {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            scene_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(scene_path, output_path)).is_ok() {
            unexpectedly_succeeded.push(scene_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError scenes that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error scene(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_explicit_config_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r##"
        [style]
        background_color = "#101820"
        "##,
    )
    .expect("Failed to write config");

    let scene_path = scenes_dir().join("deployment.toml");
    let output_path = temp_dir.path().join("configured.svg");
    let mut args = args_for(&scene_path, output_path.clone());
    args.config = Some(config_path.to_string_lossy().to_string());

    run(&args).expect("Configured run failed");

    let svg = fs::read_to_string(&output_path).expect("Failed to read output");
    assert!(svg.contains("#101820"));
}

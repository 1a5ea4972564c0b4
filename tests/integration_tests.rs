mod common;

use assert_cmd::Command;
use common::{write_corrupt_image, write_rgb_image, write_rgba_png};
use image::GenericImageView;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn img_slim() -> Command {
    Command::cargo_bin("img-slim").unwrap()
}

#[test]
fn test_cli_help() {
    img_slim().arg("--help").assert().success();
}

#[test]
fn test_invalid_quality_rejected_before_touching_files() {
    let temp_dir = TempDir::new().unwrap();
    let photo = temp_dir.path().join("photo.jpg");
    write_rgb_image(&photo, 64, 64);
    let original_bytes = fs::read(&photo).unwrap();

    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy(), "-q", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid quality"));

    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy(), "-q", "101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid quality"));

    // Nothing was optimized or backed up.
    assert_eq!(fs::read(&photo).unwrap(), original_bytes);
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_missing_directory_fails() {
    img_slim()
        .args(["-d", "/definitely/not/a/real/directory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory not found"));
}

#[test]
fn test_empty_directory_reports_no_images() {
    let temp_dir = TempDir::new().unwrap();

    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No image files found"));
}

#[test]
fn test_oversized_jpeg_fits_bounding_box() {
    let temp_dir = TempDir::new().unwrap();
    let photo = temp_dir.path().join("landscape.jpg");
    write_rgb_image(&photo, 3000, 2000);

    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy(), "--max-size", "1200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Images processed: 1"))
        .stdout(predicate::str::contains("Images with errors: 0"));

    let optimized = image::open(&photo).unwrap();
    assert_eq!(optimized.dimensions(), (1200, 800));
}

#[test]
fn test_small_image_keeps_dimensions() {
    let temp_dir = TempDir::new().unwrap();
    let photo = temp_dir.path().join("thumb.jpg");
    write_rgb_image(&photo, 320, 240);

    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy()])
        .assert()
        .success();

    let optimized = image::open(&photo).unwrap();
    assert_eq!(optimized.dimensions(), (320, 240));
}

#[test]
fn test_png_with_alpha_stays_png() {
    let temp_dir = TempDir::new().unwrap();
    let icon = temp_dir.path().join("icon.png");
    write_rgba_png(&icon, 64, 64);

    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy()])
        .assert()
        .success();

    // Still a PNG at the same path, transparency intact.
    let optimized = image::open(&icon).unwrap();
    assert!(optimized.color().has_alpha());
}

#[test]
fn test_corrupt_file_does_not_abort_batch() {
    let temp_dir = TempDir::new().unwrap();
    write_rgb_image(&temp_dir.path().join("good.jpg"), 128, 128);
    write_corrupt_image(&temp_dir.path().join("broken.jpg"));

    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Images processed: 1"))
        .stdout(predicate::str::contains("Images with errors: 1"))
        .stderr(predicate::str::contains("broken.jpg"));
}

#[test]
fn test_backup_keeps_original_bytes() {
    let temp_dir = TempDir::new().unwrap();
    let photo = temp_dir.path().join("photo.jpg");
    write_rgb_image(&photo, 512, 512);
    let original_bytes = fs::read(&photo).unwrap();

    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy(), "--backup"])
        .assert()
        .success();

    let backup = temp_dir.path().join("photo.backup.jpg");
    assert!(backup.exists());
    assert_eq!(fs::read(&backup).unwrap(), original_bytes);
    // The live file was replaced with the optimized encode.
    assert!(photo.exists());
    assert_ne!(fs::read(&photo).unwrap(), original_bytes);
}

#[test]
fn test_second_backup_run_still_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let photo = temp_dir.path().join("photo.jpg");
    write_rgb_image(&photo, 512, 512);

    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy(), "--backup"])
        .assert()
        .success();

    // An existing backup is never overwritten and never raises.
    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy(), "--backup"])
        .assert()
        .success();

    assert!(temp_dir.path().join("photo.backup.jpg").exists());
    assert!(photo.exists());
}

#[test]
fn test_output_mode_mirrors_tree_and_preserves_sources() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    let nested = source.join("albums/summer");
    fs::create_dir_all(&nested).unwrap();

    let top = source.join("cover.jpg");
    let deep = nested.join("beach.png");
    write_rgb_image(&top, 256, 256);
    write_rgba_png(&deep, 128, 128);
    let top_bytes = fs::read(&top).unwrap();
    let deep_bytes = fs::read(&deep).unwrap();

    let output = temp_dir.path().join("optimized");
    img_slim()
        .args([
            "-d",
            &source.to_string_lossy(),
            "-r",
            "-o",
            &output.to_string_lossy(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Images processed: 2"));

    assert!(output.join("cover.jpg").exists());
    assert!(output.join("albums/summer/beach.png").exists());

    // Sources untouched, and no backups even if --backup were moot.
    assert_eq!(fs::read(&top).unwrap(), top_bytes);
    assert_eq!(fs::read(&deep).unwrap(), deep_bytes);
    assert!(!source.join("cover.backup.jpg").exists());
}

#[test]
fn test_bmp_is_reencoded_as_jpeg() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    fs::create_dir_all(&source).unwrap();
    write_rgb_image(&source.join("scan.bmp"), 200, 100);

    let output = temp_dir.path().join("optimized");
    img_slim()
        .args([
            "-d",
            &source.to_string_lossy(),
            "-o",
            &output.to_string_lossy(),
        ])
        .assert()
        .success();

    // The container changes, so the extension is forced to .jpg.
    let converted = output.join("scan.jpg");
    assert!(converted.exists());
    assert!(!output.join("scan.bmp").exists());
    assert_eq!(image::open(&converted).unwrap().dimensions(), (200, 100));
}

#[test]
fn test_webp_round_trips_as_webp() {
    let temp_dir = TempDir::new().unwrap();
    let banner = temp_dir.path().join("banner.webp");
    write_rgb_image(&banner, 300, 150);

    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy()])
        .assert()
        .success();

    assert!(banner.exists());
    assert_eq!(image::open(&banner).unwrap().dimensions(), (300, 150));
}

#[test]
fn test_flat_run_skips_subdirectories() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    write_rgb_image(&temp_dir.path().join("top.jpg"), 64, 64);
    let deep = nested.join("deep.jpg");
    write_rgb_image(&deep, 64, 64);
    let deep_bytes = fs::read(&deep).unwrap();

    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Images processed: 1"));

    assert_eq!(fs::read(&deep).unwrap(), deep_bytes);
}

#[test]
fn test_recursive_run_descends() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    write_rgb_image(&temp_dir.path().join("top.jpg"), 64, 64);
    write_rgb_image(&nested.join("deep.jpg"), 64, 64);

    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy(), "-r"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Images processed: 2"));
}

#[test]
fn test_quiet_mode_suppresses_chatter() {
    let temp_dir = TempDir::new().unwrap();
    write_rgb_image(&temp_dir.path().join("photo.jpg"), 64, 64);

    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy(), "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_exit_zero_even_when_every_file_errors() {
    let temp_dir = TempDir::new().unwrap();
    write_corrupt_image(&temp_dir.path().join("one.jpg"));
    write_corrupt_image(&temp_dir.path().join("two.png"));

    img_slim()
        .args(["-d", &temp_dir.path().to_string_lossy()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Images processed: 0"))
        .stdout(predicate::str::contains("Images with errors: 2"));
}

use crate::backup;
use crate::constants::SUPPORTED_IMAGE_EXTENSIONS;
use crate::error::{OptimizeError, Result};
use crate::processing::{optimize_image, OptimizeOptions, OptimizeOutcome};
use crate::utils::{delta_percent, display_name, format_file_size, format_signed_size, savings_percent};
use crate::{error, info, interrupt, logger, verbose};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use walkdir::{DirEntry, WalkDir};

/// Aggregate counters for one batch run. Created once, mutated exactly
/// once per candidate file (success or failure path), read once for the
/// summary. The runner serializes updates behind a mutex.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub original_bytes: u64,
    pub optimized_bytes: u64,
}

impl Stats {
    pub fn record_success(&mut self, original_size: u64, optimized_size: u64) {
        self.processed += 1;
        self.original_bytes += original_size;
        self.optimized_bytes += optimized_size;
    }

    pub fn record_failure(&mut self) {
        self.errors += 1;
        self.skipped += 1;
    }

    /// Bytes saved across the run; negative when outputs grew.
    pub fn bytes_saved(&self) -> i64 {
        self.original_bytes as i64 - self.optimized_bytes as i64
    }
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Enumerate candidate image files directly under `root`, or the whole
/// subtree with `recursive`. Hidden entries are skipped; the root itself
/// is exempt so `-d .` works.
pub fn collect_image_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(OptimizeError::DirectoryNotFound(root.to_path_buf()));
    }

    let walker = if recursive {
        WalkDir::new(root)
    } else {
        WalkDir::new(root).max_depth(1)
    };

    let mut image_files = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = entry?;
        if entry.file_type().is_file() && is_image_file(entry.path()) {
            image_files.push(entry.into_path());
        }
    }

    Ok(image_files)
}

/// Optimize every candidate under `root`.
///
/// With `output_root` set, results mirror the source tree under it and
/// originals are never touched; otherwise files are overwritten in place
/// and the backup policy may rename originals aside first. A single
/// file's failure is logged and counted, never fatal. An interrupt stops
/// submission of new work, prints the partial summary and surfaces as an
/// error.
pub fn run_batch(
    root: &Path,
    recursive: bool,
    backup_requested: bool,
    output_root: Option<&Path>,
    options: &OptimizeOptions,
) -> Result<Stats> {
    let image_files = collect_image_files(root, recursive)?;

    if image_files.is_empty() {
        return Err(OptimizeError::NoImagesFound(root.to_path_buf()));
    }

    info!("📊 Found {} images to optimize", image_files.len());
    info!("{}", "-".repeat(60));

    if let Some(output_dir) = output_root {
        fs::create_dir_all(output_dir)
            .map_err(|_| OptimizeError::DirectoryCreationFailed(output_dir.to_path_buf()))?;
    }

    let progress = if logger::is_quiet() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(image_files.len() as u64)
    };
    progress.set_style(ProgressStyle::default_bar());

    let stats = Mutex::new(Stats::default());

    image_files.par_iter().for_each(|input_path| {
        if interrupt::is_interrupted() {
            return;
        }

        verbose!("Processing {}", input_path.display());

        match process_single_file(input_path, root, output_root, backup_requested, options) {
            Ok(outcome) => {
                let mut stats = stats.lock().unwrap_or_else(|e| e.into_inner());
                stats.record_success(outcome.original_size, outcome.optimized_size);
                drop(stats);
                info!("{}", format_report_line(input_path, &outcome));
            }
            Err(e) => {
                let mut stats = stats.lock().unwrap_or_else(|e| e.into_inner());
                stats.record_failure();
                drop(stats);
                error!("Failed to process {}: {}", display_name(input_path), e);
            }
        }
        progress.inc(1);
    });

    progress.finish_and_clear();

    let stats = stats.into_inner().unwrap_or_else(|e| e.into_inner());
    print_summary(&stats);

    if interrupt::is_interrupted() {
        return Err(OptimizeError::Interrupted);
    }

    Ok(stats)
}

fn process_single_file(
    input_path: &Path,
    root: &Path,
    output_root: Option<&Path>,
    backup_requested: bool,
    options: &OptimizeOptions,
) -> Result<OptimizeOutcome> {
    let dest = match output_root {
        Some(output_dir) => {
            let relative = input_path.strip_prefix(root).unwrap_or(input_path);
            output_dir.join(relative)
        }
        None => input_path.to_path_buf(),
    };

    let in_place = output_root.is_none();
    let read_path = backup::prepare_backup(input_path, backup_requested, in_place)?;

    optimize_image(&read_path, &dest, options)
}

fn format_report_line(input_path: &Path, outcome: &OptimizeOutcome) -> String {
    let delta = delta_percent(outcome.original_size, outcome.optimized_size);
    format!(
        "✅ {}: {} -> {} ({:+.1}%)",
        display_name(input_path),
        format_file_size(outcome.original_size),
        format_file_size(outcome.optimized_size),
        delta
    )
}

fn print_summary(stats: &Stats) {
    info!("{}", "-".repeat(60));
    info!("📊 Optimization Summary:");
    info!("  📁 Images processed: {}", stats.processed);
    info!("  ❌ Images with errors: {}", stats.errors);
    info!(
        "  📊 Total original size: {}",
        format_file_size(stats.original_bytes)
    );
    info!(
        "  📊 Total optimized size: {}",
        format_file_size(stats.optimized_bytes)
    );

    if stats.original_bytes > 0 {
        info!(
            "  💾 Space saved: {} ({:.1}%)",
            format_signed_size(stats.bytes_saved()),
            savings_percent(stats.original_bytes, stats.optimized_bytes)
        );
    }
}

use std::path::Path;

/// Format a byte count as a human-readable size string.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Format a possibly-negative byte delta (saved space can go negative
/// when images grow).
pub fn format_signed_size(bytes: i64) -> String {
    if bytes < 0 {
        format!("-{}", format_file_size(bytes.unsigned_abs()))
    } else {
        format_file_size(bytes as u64)
    }
}

/// Size change as a percentage of the original. Positive means the file
/// grew, negative means it shrank. Zero when the original size is zero.
pub fn delta_percent(original_size: u64, optimized_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((optimized_size as f64 - original_size as f64) / original_size as f64) * 100.0
}

/// Space saved as a percentage of the original (negative if files grew).
pub fn savings_percent(original_size: u64, optimized_size: u64) -> f64 {
    -delta_percent(original_size, optimized_size)
}

/// File name component for report lines, falling back to the full path
/// display when the path ends in `..`.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

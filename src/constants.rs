pub const DEFAULT_QUALITY: u8 = 85;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

pub const DEFAULT_MAX_WIDTH: u32 = 1920;
pub const DEFAULT_MAX_HEIGHT: u32 = 1080;

/// Extensions accepted by the directory walker (lowercase, no dot).
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "tiff"];

/// Infix inserted before the original suffix when a backup is made,
/// e.g. `photo.jpg` -> `photo.backup.jpg`.
pub const BACKUP_INFIX: &str = "backup";

/// oxipng preset used for PNG re-compression.
pub const PNG_OPTIMIZATION_PRESET: u8 = 4;

/// libwebp `method` parameter, 0 (fast) to 6 (slowest/best compression).
pub const WEBP_COMPRESSION_METHOD: i32 = 6;

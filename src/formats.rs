/// Target encode formats and the extension table that selects them.
///
/// The mapping from an input extension to the re-encode format is fixed:
/// lossy photographic containers (jpg/jpeg) and the legacy uncompressed
/// ones (bmp/tiff) become JPEG, png stays PNG, webp stays WebP. Anything
/// else that slipped past the walker's filter falls back to JPEG.
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeFormat {
    Jpeg,
    Png,
    WebP,
}

impl EncodeFormat {
    /// Resolve the target format from an input file extension.
    /// Total and case-insensitive; never fails.
    pub fn from_input_extension(extension: &str) -> Self {
        match extension
            .trim_start_matches('.')
            .to_lowercase()
            .as_str()
        {
            "png" => EncodeFormat::Png,
            "webp" => EncodeFormat::WebP,
            _ => EncodeFormat::Jpeg,
        }
    }

    /// Resolve the target format for a path, defaulting to JPEG when the
    /// path has no usable extension.
    pub fn for_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_input_extension)
            .unwrap_or(EncodeFormat::Jpeg)
    }

    /// Canonical output extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            EncodeFormat::Jpeg => "jpg",
            EncodeFormat::Png => "png",
            EncodeFormat::WebP => "webp",
        }
    }
}

impl fmt::Display for EncodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncodeFormat::Jpeg => "JPEG",
            EncodeFormat::Png => "PNG",
            EncodeFormat::WebP => "WebP",
        };
        write!(f, "{}", name)
    }
}

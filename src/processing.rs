use crate::constants::{
    DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY,
    PNG_OPTIMIZATION_PRESET, WEBP_COMPRESSION_METHOD,
};
use crate::error::{OptimizeError, Result};
use crate::formats::EncodeFormat;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{
    imageops, DynamicImage, GenericImageView, ImageDecoder, ImageFormat, ImageReader, Rgba,
    RgbaImage,
};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    pub quality: u8,
    pub max_width: u32,
    pub max_height: u32,
    pub progressive: bool,
}

impl OptimizeOptions {
    pub fn new(quality: u8, max_width: u32, max_height: u32, progressive: bool) -> Result<Self> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(OptimizeError::InvalidQuality(quality));
        }

        Ok(Self {
            quality,
            max_width,
            max_height,
            progressive,
        })
    }
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            progressive: true,
        }
    }
}

/// Result of optimizing a single file.
#[derive(Debug, Clone)]
pub struct OptimizeOutcome {
    pub original_size: u64,
    pub optimized_size: u64,
    /// Where the encoded bytes were written. Differs from the requested
    /// destination when a JPEG re-encode forces the `.jpg` suffix.
    pub output_path: PathBuf,
}

/// Load an image together with its byte size and EXIF orientation.
///
/// The orientation is captured from the decoder before the pixel data is
/// materialized; applying it later is a pure pixel transform and the tag
/// itself is never written back out.
pub fn load_image_with_orientation(input_path: &Path) -> Result<(DynamicImage, Orientation, u64)> {
    let file_size = fs::metadata(input_path)?.len();

    let mut decoder = ImageReader::open(input_path)?
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let img = DynamicImage::from_decoder(decoder)?;

    Ok((img, orientation, file_size))
}

/// Target dimensions for an aspect-preserving fit into `max_width` x
/// `max_height`. Images already inside the box come back unchanged;
/// larger ones are scaled down so neither axis exceeds its bound.
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let fitted_width = ((width as f64 * scale).round() as u32)
        .max(1)
        .min(max_width.max(1));
    let fitted_height = ((height as f64 * scale).round() as u32)
        .max(1)
        .min(max_height.max(1));

    (fitted_width, fitted_height)
}

/// Downscale to fit the bounding box, or pass the image through untouched
/// when it already fits. Never upscales.
pub fn fit_within(img: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    let (target_width, target_height) = fit_dimensions(width, height, max_width, max_height);

    if (target_width, target_height) == (width, height) {
        img
    } else {
        img.resize_exact(target_width, target_height, FilterType::Lanczos3)
    }
}

/// Composite an image with transparency onto an opaque white canvas.
/// Fully transparent pixels come out white, partial alpha is blended.
pub fn flatten_onto_white(img: &DynamicImage) -> DynamicImage {
    let mut canvas = RgbaImage::from_pixel(img.width(), img.height(), Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &img.to_rgba8(), 0, 0);
    DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8())
}

/// The per-image transform pipeline. Stage order is load-bearing: the
/// white flatten must see the pre-resize pixels, and the orientation
/// transform runs on the resized image before encoding.
pub fn transform_image(
    img: DynamicImage,
    orientation: Orientation,
    format: EncodeFormat,
    options: &OptimizeOptions,
) -> Result<Vec<u8>> {
    let img = if format == EncodeFormat::Jpeg && img.color().has_alpha() {
        flatten_onto_white(&img)
    } else {
        img
    };

    let mut img = fit_within(img, options.max_width, options.max_height);
    img.apply_orientation(orientation);

    match format {
        EncodeFormat::Jpeg => encode_jpeg(&img, options.quality, options.progressive),
        EncodeFormat::Png => encode_png(&img),
        EncodeFormat::WebP => encode_webp(&img, options.quality),
    }
}

/// Final output path for a destination: JPEG re-encodes force a `.jpg`
/// suffix, other formats keep the destination as-is.
pub fn resolve_output_path(dest: &Path, format: EncodeFormat) -> PathBuf {
    if format != EncodeFormat::Jpeg {
        return dest.to_path_buf();
    }

    match dest.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if matches!(ext.to_lowercase().as_str(), "jpg" | "jpeg") => dest.to_path_buf(),
        _ => dest.with_extension(EncodeFormat::Jpeg.extension()),
    }
}

/// Optimize one file: decode from `input_path`, run the transform
/// pipeline, and write the result at `dest` (modulo the `.jpg` forcing).
/// Any codec failure surfaces as a single crate error and leaves the
/// batch free to continue.
pub fn optimize_image(
    input_path: &Path,
    dest: &Path,
    options: &OptimizeOptions,
) -> Result<OptimizeOutcome> {
    let format = EncodeFormat::for_path(input_path);
    let (img, orientation, original_size) = load_image_with_orientation(input_path)?;

    let encoded = transform_image(img, orientation, format, options)?;

    let output_path = resolve_output_path(dest, format);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|_| OptimizeError::DirectoryCreationFailed(parent.to_path_buf()))?;
        }
    }
    fs::write(&output_path, &encoded)?;

    Ok(OptimizeOutcome {
        original_size,
        optimized_size: encoded.len() as u64,
        output_path,
    })
}

fn encode_jpeg(img: &DynamicImage, quality: u8, progressive: bool) -> Result<Vec<u8>> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
    comp.set_size(width as usize, height as usize);
    comp.set_quality(quality as f32);

    if progressive {
        comp.set_scan_optimization_mode(mozjpeg::ScanMode::AllComponentsTogether);
    }

    let mut comp = comp.start_compress(Vec::new())?;
    comp.write_scanlines(rgb.as_raw())?;
    let encoded = comp.finish()?;

    Ok(encoded)
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)?;

    let oxipng_options = oxipng::Options::from_preset(PNG_OPTIMIZATION_PRESET);
    oxipng::optimize_from_memory(&png_bytes, &oxipng_options)
        .map_err(|e| OptimizeError::PngOptimization(e.to_string()))
}

fn encode_webp(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), width, height);
    let mut config = webp::WebPConfig::new()
        .map_err(|_| OptimizeError::WebPEncoding("failed to initialize config".to_string()))?;
    config.quality = quality as f32;
    config.method = WEBP_COMPRESSION_METHOD;

    let memory = encoder
        .encode_advanced(&config)
        .map_err(|e| OptimizeError::WebPEncoding(format!("{:?}", e)))?;

    Ok(memory.to_vec())
}

pub mod backup;
pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod formats;
pub mod interrupt;
pub mod logger;
pub mod processing;
pub mod utils;

pub use backup::{backup_needed, backup_path, prepare_backup};
pub use batch::{collect_image_files, is_image_file, run_batch, Stats};
pub use error::{OptimizeError, Result};
pub use formats::EncodeFormat;
pub use processing::{
    fit_dimensions, fit_within, flatten_onto_white, load_image_with_orientation, optimize_image,
    resolve_output_path, transform_image, OptimizeOptions, OptimizeOutcome,
};
pub use utils::{delta_percent, format_file_size, format_signed_size, savings_percent};

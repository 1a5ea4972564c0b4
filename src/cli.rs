use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-slim",
    about = "Batch-optimize images for the web while preserving visual quality",
    long_about = "img-slim re-encodes every supported image under a directory to a \
                  web-friendly size and compression level and reports the space saved. \
                  JPEG, PNG and WebP outputs are supported; bmp and tiff inputs are \
                  re-encoded as JPEG.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    img-slim                          # optimize images in the current directory\n  \
    img-slim -d ./photos -r           # include subdirectories\n  \
    img-slim -q 90 --max-size 1200    # higher quality, 1200px bounding box\n  \
    img-slim --backup                 # keep originals as .backup files\n  \
    img-slim -o optimized/            # mirror results into a separate tree"
)]
pub struct Args {
    #[arg(
        short = 'd',
        long,
        default_value = ".",
        help = "Directory to process"
    )]
    pub directory: PathBuf,

    #[arg(short = 'r', long, help = "Process subdirectories recursively")]
    pub recursive: bool,

    #[arg(
        short = 'q',
        long,
        default_value_t = 85,
        help = "Encode quality (1-100)",
        long_help = "Encode quality from 1 (smallest) to 100 (best). Applies to JPEG \
                     and WebP outputs; PNG re-compression is always lossless."
    )]
    pub quality: u8,

    #[arg(long, default_value_t = 1920, help = "Maximum width in pixels")]
    pub max_width: u32,

    #[arg(long, default_value_t = 1080, help = "Maximum height in pixels")]
    pub max_height: u32,

    #[arg(
        long,
        help = "Maximum size in pixels, overrides both --max-width and --max-height"
    )]
    pub max_size: Option<u32>,

    #[arg(
        long,
        help = "Keep the original of each overwritten file as a .backup sibling"
    )]
    pub backup: bool,

    #[arg(
        short = 'o',
        long,
        help = "Write results under this directory, mirroring the source tree; originals are left untouched"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Disable progressive JPEG encoding")]
    pub no_progressive: bool,

    #[arg(
        short = 'j',
        long,
        help = "Number of parallel threads (default: auto)",
        long_help = "Number of worker threads for the batch loop. \
                     If not specified, uses the number of CPU cores."
    )]
    pub threads: Option<usize>,

    #[arg(long, help = "Suppress all output except errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Show per-step detail")]
    pub verbose: bool,
}

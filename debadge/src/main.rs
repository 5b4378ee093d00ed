use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use classical_inpaint::Method;
use tracing_subscriber::EnvFilter;

use debadge::pipeline::clean_image;
use debadge::rect::Rect;

/// Remove rectangular overlays from images using inpainting.
#[derive(Parser)]
#[command(name = "debadge", version, about = "Remove rectangular overlays from images using inpainting")]
struct Cli {
    /// Input image path
    input: PathBuf,

    /// Output image path
    output: PathBuf,

    /// Rectangle to remove: x,y,w,h (repeatable)
    #[arg(long = "rect", value_name = "X,Y,W,H", required = true)]
    rects: Vec<Rect>,

    /// Inpainting method
    #[arg(long, value_enum, default_value = "telea")]
    method: Method,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match clean_image(&args.input, &args.output, &args.rects, args.method) {
        Ok(()) => {
            println!("Saved cleaned image to {}", args.output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

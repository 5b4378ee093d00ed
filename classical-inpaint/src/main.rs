use clap::Parser;
use classical_inpaint::{Method, inpaint};

/// Inpaint an image using an externally produced mask image.
///
/// White mask pixels are synthesized, black pixels are kept.
#[derive(Parser)]
struct Cli {
    #[arg(long)]
    image: String,

    #[arg(long)]
    mask: String,

    #[arg(long, default_value = "output.png")]
    output: String,

    #[arg(long, value_enum, default_value = "telea")]
    method: Method,

    #[arg(long, default_value_t = 3)]
    radius: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let image =
        image::open(&args.image).map_err(|e| anyhow::anyhow!("Failed to open image: {e}"))?;
    let mask = image::open(&args.mask).map_err(|e| anyhow::anyhow!("Failed to open mask: {e}"))?;

    let result = inpaint(&image, &mask.to_luma8(), args.radius, args.method)?;

    result
        .save(&args.output)
        .map_err(|e| anyhow::anyhow!("Failed to save output image: {e}"))?;

    println!("Successfully processed and saved image to {}", args.output);

    Ok(())
}

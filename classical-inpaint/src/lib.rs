//! Classical inpainting over `image` buffers.
//!
//! Two algorithms are provided behind one entry point: Telea's
//! fast-marching method and a Navier-Stokes style isophote diffusion.
//! Both synthesize the pixels selected by a binary mask from the
//! surrounding image content.

mod fmm;
mod ns;

use anyhow::ensure;
use image::{DynamicImage, GrayImage, RgbImage};
use ndarray::{Array2, Array3};

/// Inpainting algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Method {
    /// Telea's fast-marching method.
    Telea,
    /// Navier-Stokes style isophote diffusion.
    #[value(name = "ns")]
    NavierStokes,
}

/// Fill the masked pixels of `image` from the surrounding content.
///
/// The mask must have the same dimensions as the image; every nonzero
/// mask cell is synthesized, every zero cell is left untouched.
/// Grayscale input is promoted to 3 channels before processing, so the
/// result is always an RGB image of the input's dimensions. `radius`
/// bounds the neighborhood each synthesized pixel samples from.
pub fn inpaint(
    image: &DynamicImage,
    mask: &GrayImage,
    radius: u32,
    method: Method,
) -> anyhow::Result<RgbImage> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    ensure!(
        mask.dimensions() == (width, height),
        "mask is {}x{} but image is {}x{}",
        mask.width(),
        mask.height(),
        width,
        height,
    );
    ensure!(radius > 0, "inpaint radius must be at least 1");

    let mut planes: Array3<f32> = Array3::from_shape_vec(
        (height as usize, width as usize, 3),
        rgb.as_raw().iter().map(|&v| v as f32).collect(),
    )?;
    let mask: Array2<u8> =
        Array2::from_shape_vec((height as usize, width as usize), mask.as_raw().clone())?;

    match method {
        Method::Telea => fmm::telea(&mut planes, &mask, radius),
        Method::NavierStokes => ns::navier_stokes(&mut planes, &mask, radius),
    }

    let data = planes
        .iter()
        .map(|&v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    RgbImage::from_raw(width, height, data)
        .ok_or_else(|| anyhow::anyhow!("inpainted buffer has the wrong length"))
}

/// In-bounds 4-neighbors of a grid cell.
pub(crate) fn neighbors4(
    y: usize,
    x: usize,
    height: usize,
    width: usize,
) -> impl Iterator<Item = (usize, usize)> {
    const OFFSETS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
    OFFSETS.into_iter().filter_map(move |(dy, dx)| {
        let ny = y as i64 + dy;
        let nx = x as i64 + dx;
        (ny >= 0 && nx >= 0 && ny < height as i64 && nx < width as i64)
            .then(|| (ny as usize, nx as usize))
    })
}

//! Navier-Stokes style inpainting.
//!
//! The image Laplacian plays the role of vorticity: its value is
//! transported along isophote directions into the masked region, with
//! periodic diffusion passes to keep the field smooth. The region is
//! seeded by an onion-peel fill from its boundary so the transport
//! iteration starts from plausible values.

use ndarray::{Array2, Array3, Axis};

use crate::neighbors4;

const TRANSPORT_ITERS: usize = 300;
const DIFFUSE_EVERY: usize = 6;
const DT: f32 = 0.1;

pub(crate) fn navier_stokes(image: &mut Array3<f32>, mask: &Array2<u8>, radius: u32) {
    let targets: Vec<(usize, usize)> = mask
        .indexed_iter()
        .filter(|&(_, &m)| m != 0)
        .map(|(p, _)| p)
        .collect();
    if targets.is_empty() {
        return;
    }

    init_onion_peel(image, mask);

    // a larger sampling radius warrants letting the transport run longer
    let iters = TRANSPORT_ITERS.max(100 * radius as usize);
    for c in 0..3 {
        let mut plane = image.index_axis(Axis(2), c).to_owned();
        evolve(&mut plane, &targets, iters);
        image.index_axis_mut(Axis(2), c).assign(&plane);
    }
}

/// Fill the masked region ring by ring with the mean of the already
/// filled 8-neighbors. Purely an initialization; the transport iteration
/// reshapes the result.
fn init_onion_peel(image: &mut Array3<f32>, mask: &Array2<u8>) {
    let (height, width) = mask.dim();
    let mut filled = mask.map(|&m| m == 0);
    if !filled.iter().any(|&f| f) {
        // nothing known anywhere, no boundary to peel from
        return;
    }

    loop {
        let mut ring = Vec::new();
        for ((y, x), &done) in filled.indexed_iter() {
            if done {
                continue;
            }
            let mut sum = [0.0f32; 3];
            let mut count = 0.0f32;
            for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                    if !filled[[ny, nx]] {
                        continue;
                    }
                    for c in 0..3 {
                        sum[c] += image[[ny, nx, c]];
                    }
                    count += 1.0;
                }
            }
            if count > 0.0 {
                ring.push((y, x, [sum[0] / count, sum[1] / count, sum[2] / count]));
            }
        }
        if ring.is_empty() {
            break;
        }
        for (y, x, value) in ring {
            for c in 0..3 {
                image[[y, x, c]] = value[c];
            }
            filled[[y, x]] = true;
        }
    }
}

/// Explicit transport iteration on one channel plane.
fn evolve(plane: &mut Array2<f32>, targets: &[(usize, usize)], iters: usize) {
    let (height, width) = plane.dim();
    for it in 0..iters {
        let snapshot = plane.clone();
        let v = |y: i64, x: i64| -> f32 {
            snapshot[[
                y.clamp(0, height as i64 - 1) as usize,
                x.clamp(0, width as i64 - 1) as usize,
            ]]
        };
        let lap = |y: i64, x: i64| -> f32 {
            v(y + 1, x) + v(y - 1, x) + v(y, x + 1) + v(y, x - 1) - 4.0 * v(y, x)
        };
        for &(y, x) in targets {
            let yy = y as i64;
            let xx = x as i64;
            let grad_ly = (lap(yy + 1, xx) - lap(yy - 1, xx)) / 2.0;
            let grad_lx = (lap(yy, xx + 1) - lap(yy, xx - 1)) / 2.0;
            let iy = (v(yy + 1, xx) - v(yy - 1, xx)) / 2.0;
            let ix = (v(yy, xx + 1) - v(yy, xx - 1)) / 2.0;
            // isophote direction is the intensity gradient rotated a quarter turn
            let norm = (ix * ix + iy * iy).sqrt() + 1e-6;
            let beta = (-iy * grad_lx + ix * grad_ly) / norm;
            plane[[y, x]] = (snapshot[[y, x]] + DT * beta).clamp(0.0, 255.0);
        }
        if it % DIFFUSE_EVERY == 0 {
            diffuse(plane, targets);
        }
    }
}

/// One smoothing pass over the masked pixels only.
fn diffuse(plane: &mut Array2<f32>, targets: &[(usize, usize)]) {
    let (height, width) = plane.dim();
    let snapshot = plane.clone();
    for &(y, x) in targets {
        let mut sum = 0.0f32;
        let mut count = 0.0f32;
        for (ny, nx) in neighbors4(y, x, height, width) {
            sum += snapshot[[ny, nx]];
            count += 1.0;
        }
        if count > 0.0 {
            plane[[y, x]] = 0.5 * snapshot[[y, x]] + 0.5 * sum / count;
        }
    }
}

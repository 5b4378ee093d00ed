//! Telea fast-marching inpainting.
//!
//! The fill front marches inward from the mask boundary in order of
//! distance to the known region. Each pixel is painted the moment the
//! front reaches it, as a weighted average of the already known pixels
//! within the sampling radius; the weights favor sources that are close,
//! on the same level set, and in the direction the front is moving.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ndarray::{Array2, Array3};

use crate::neighbors4;

const KNOWN: u8 = 0;
const BAND: u8 = 1;
const INSIDE: u8 = 2;

/// Distance assigned to pixels the front has not reached.
const FAR: f32 = 1e6;

/// Narrow-band heap entry, ordered closest-first.
struct Front {
    t: f32,
    y: usize,
    x: usize,
}

impl PartialEq for Front {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t
    }
}

impl Eq for Front {}

impl PartialOrd for Front {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Front {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the maximum; invert to pop the smallest distance
        other.t.total_cmp(&self.t)
    }
}

pub(crate) fn telea(image: &mut Array3<f32>, mask: &Array2<u8>, radius: u32) {
    let (height, width) = mask.dim();
    let mut flags = Array2::from_elem((height, width), KNOWN);
    let mut dist = Array2::<f32>::zeros((height, width));
    let mut heap = BinaryHeap::new();

    for ((y, x), &m) in mask.indexed_iter() {
        if m != 0 {
            flags[[y, x]] = INSIDE;
            dist[[y, x]] = FAR;
        }
    }

    // Seed the band with the known pixels bordering the fill region.
    for ((y, x), &m) in mask.indexed_iter() {
        if m != 0 {
            continue;
        }
        if neighbors4(y, x, height, width).any(|(ny, nx)| flags[[ny, nx]] == INSIDE) {
            flags[[y, x]] = BAND;
            heap.push(Front { t: 0.0, y, x });
        }
    }

    while let Some(Front { t: _, y, x }) = heap.pop() {
        if flags[[y, x]] == KNOWN {
            continue; // superseded entry
        }
        flags[[y, x]] = KNOWN;

        for (ny, nx) in neighbors4(y, x, height, width) {
            if flags[[ny, nx]] == KNOWN {
                continue;
            }
            let up = frozen_t(&dist, &flags, ny as i64 - 1, nx as i64);
            let down = frozen_t(&dist, &flags, ny as i64 + 1, nx as i64);
            let left = frozen_t(&dist, &flags, ny as i64, nx as i64 - 1);
            let right = frozen_t(&dist, &flags, ny as i64, nx as i64 + 1);
            let t_new = solve(up, left)
                .min(solve(up, right))
                .min(solve(down, left))
                .min(solve(down, right));
            if t_new < dist[[ny, nx]] {
                dist[[ny, nx]] = t_new;
                if flags[[ny, nx]] == INSIDE {
                    paint(image, ny, nx, &dist, &flags, radius);
                    flags[[ny, nx]] = BAND;
                }
                heap.push(Front { t: t_new, y: ny, x: nx });
            }
        }
    }
}

/// Distance at a cell the front has already valued, `FAR` otherwise.
fn frozen_t(dist: &Array2<f32>, flags: &Array2<u8>, y: i64, x: i64) -> f32 {
    let (height, width) = flags.dim();
    if y < 0 || x < 0 || y >= height as i64 || x >= width as i64 {
        return FAR;
    }
    let p = [y as usize, x as usize];
    if flags[p] == INSIDE { FAR } else { dist[p] }
}

/// One step of the eikonal update from a vertical/horizontal neighbor pair.
fn solve(t1: f32, t2: f32) -> f32 {
    let (a, b) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
    if a >= FAR {
        return FAR;
    }
    if b - a >= 1.0 {
        a + 1.0
    } else {
        let d = 2.0 - (b - a) * (b - a);
        (a + b + d.sqrt()) / 2.0
    }
}

/// Paint one pixel from the known pixels within `radius`.
fn paint(image: &mut Array3<f32>, y: usize, x: usize, dist: &Array2<f32>, flags: &Array2<u8>, radius: u32) {
    let (height, width) = flags.dim();
    let r = radius as i64;
    let (gy, gx) = dist_gradient(dist, flags, y, x);
    let yc = y as i64;
    let xc = x as i64;

    let mut value = [0.0f32; 3];
    let mut weight_sum = 0.0f32;
    for ny in (yc - r).max(0)..=(yc + r).min(height as i64 - 1) {
        for nx in (xc - r).max(0)..=(xc + r).min(width as i64 - 1) {
            let p = [ny as usize, nx as usize];
            if flags[p] != KNOWN {
                continue;
            }
            let dy = (yc - ny) as f32;
            let dx = (xc - nx) as f32;
            let len_sq = dx * dx + dy * dy;
            if len_sq > (r * r) as f32 {
                continue;
            }
            let len = len_sq.sqrt();
            // direction, geometric distance and level-set closeness factors
            let mut dir = (dx * gx + dy * gy).abs() / len;
            if dir < 1e-6 {
                dir = 1e-6;
            }
            let dst = 1.0 / len_sq;
            let lev = 1.0 / (1.0 + (dist[p] - dist[[y, x]]).abs());
            let w = dir * dst * lev;
            for c in 0..3 {
                value[c] += w * image[[p[0], p[1], c]];
            }
            weight_sum += w;
        }
    }

    if weight_sum > 0.0 {
        for c in 0..3 {
            image[[y, x, c]] = value[c] / weight_sum;
        }
    }
}

/// Gradient of the distance field, one-sided at region borders.
fn dist_gradient(dist: &Array2<f32>, flags: &Array2<u8>, y: usize, x: usize) -> (f32, f32) {
    let here = dist[[y, x]];
    let sample = |yy: i64, xx: i64| -> Option<f32> {
        let t = frozen_t(dist, flags, yy, xx);
        (t < FAR).then_some(t)
    };
    let gy = match (sample(y as i64 + 1, x as i64), sample(y as i64 - 1, x as i64)) {
        (Some(below), Some(above)) => (below - above) / 2.0,
        (Some(below), None) => below - here,
        (None, Some(above)) => here - above,
        (None, None) => 0.0,
    };
    let gx = match (sample(y as i64, x as i64 + 1), sample(y as i64, x as i64 - 1)) {
        (Some(right), Some(left)) => (right - left) / 2.0,
        (Some(right), None) => right - here,
        (None, Some(left)) => here - left,
        (None, None) => 0.0,
    };
    (gy, gx)
}

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as IpRect;

use crate::rect::Rect;

/// Rasterize the union of the given rectangles into a binary mask of the
/// image's dimensions. Covered cells are 255, everything else 0.
///
/// Each rectangle is clamped to the image bounds before painting; one
/// that clamps to an empty range contributes nothing. The result is the
/// set union of the clamped rectangles, so duplicates are harmless.
pub fn build_mask(width: u32, height: u32, rects: &[Rect]) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    for rect in rects {
        // i64 keeps x + w from overflowing for any i32 input
        let x1 = (rect.x as i64).clamp(0, width as i64);
        let x2 = (rect.x as i64 + rect.w as i64).clamp(0, width as i64);
        let y1 = (rect.y as i64).clamp(0, height as i64);
        let y2 = (rect.y as i64 + rect.h as i64).clamp(0, height as i64);
        if x2 <= x1 || y2 <= y1 {
            continue;
        }
        let clamped = IpRect::at(x1 as i32, y1 as i32).of_size((x2 - x1) as u32, (y2 - y1) as u32);
        draw_filled_rect_mut(&mut mask, clamped, Luma([255u8]));
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(mask: &GrayImage) -> usize {
        mask.pixels().filter(|p| p[0] == 255).count()
    }

    #[test]
    fn marks_the_clamped_intersection() {
        let mask = build_mask(100, 100, &[Rect { x: -10, y: -10, w: 30, h: 30 }]);
        for y in 0..100 {
            for x in 0..100 {
                let expected = x < 20 && y < 20;
                assert_eq!(
                    mask.get_pixel(x, y)[0] == 255,
                    expected,
                    "unexpected mask value at {x},{y}"
                );
            }
        }
    }

    #[test]
    fn union_is_idempotent() {
        let rects = [
            Rect { x: 10, y: 10, w: 30, h: 20 },
            Rect { x: 25, y: 15, w: 30, h: 30 },
        ];
        let doubled: Vec<Rect> = rects.iter().chain(rects.iter()).copied().collect();
        assert_eq!(build_mask(80, 80, &rects), build_mask(80, 80, &doubled));
    }

    #[test]
    fn zero_extent_rect_marks_nothing() {
        let mask = build_mask(100, 100, &[Rect { x: 5, y: 5, w: 0, h: 0 }]);
        assert_eq!(marked(&mask), 0);
    }

    #[test]
    fn negative_extent_rect_marks_nothing() {
        let mask = build_mask(100, 100, &[Rect { x: 50, y: 50, w: -10, h: 20 }]);
        assert_eq!(marked(&mask), 0);
    }

    #[test]
    fn fully_out_of_bounds_rect_marks_nothing() {
        let mask = build_mask(100, 100, &[Rect { x: 200, y: 200, w: 50, h: 50 }]);
        assert_eq!(marked(&mask), 0);
    }

    #[test]
    fn oversized_rect_clamps_to_the_image() {
        let mask = build_mask(200, 200, &[Rect { x: 30, y: 40, w: 220, h: 80 }]);
        assert_eq!(marked(&mask), (200 - 30) * (120 - 40));
        assert_eq!(mask.get_pixel(30, 40)[0], 255);
        assert_eq!(mask.get_pixel(199, 119)[0], 255);
        assert_eq!(mask.get_pixel(29, 40)[0], 0);
        assert_eq!(mask.get_pixel(30, 120)[0], 0);
    }

    #[test]
    fn overlapping_rects_mark_the_union() {
        let mask = build_mask(50, 50, &[
            Rect { x: 0, y: 0, w: 20, h: 20 },
            Rect { x: 10, y: 10, w: 20, h: 20 },
        ]);
        assert_eq!(marked(&mask), 20 * 20 + 20 * 20 - 10 * 10);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let rects = [
            Rect { x: i32::MAX, y: 0, w: i32::MAX, h: 10 },
            Rect { x: i32::MIN, y: i32::MIN, w: i32::MAX, h: i32::MAX },
        ];
        let mask = build_mask(100, 100, &rects);
        assert_eq!(marked(&mask), 0);
    }

    #[test]
    fn no_rects_means_an_empty_mask() {
        let mask = build_mask(64, 48, &[]);
        assert_eq!(mask.dimensions(), (64, 48));
        assert_eq!(marked(&mask), 0);
    }
}

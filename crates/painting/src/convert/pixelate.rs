//! Direct downsample conversion

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::color::pack;

/// Resample `img` to `width × height` with smoothing and pack every pixel
///
/// Alpha is carried through unchanged, so transparent source regions stay
/// transparent cells.
pub fn pixelate(img: &RgbaImage, width: u32, height: u32) -> Vec<u32> {
    let resized = imageops::resize(img, width, height, FilterType::Triangle);
    resized
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            pack(r, g, b, a)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_pixelate_uniform_color() {
        let img = RgbaImage::from_pixel(50, 30, Rgba([12, 34, 56, 255]));
        let colors = pixelate(&img, 10, 6);
        assert_eq!(colors.len(), 60);
        assert!(colors.iter().all(|&c| c == 0xFF0C2238));
    }

    #[test]
    fn test_pixelate_keeps_halves_apart() {
        // Left half red, right half blue
        let img = RgbaImage::from_fn(64, 64, |x, _| {
            if x < 32 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        let colors = pixelate(&img, 8, 8);
        assert_eq!(colors[0], 0xFFFF0000);
        assert_eq!(colors[7], 0xFF0000FF);
        assert_eq!(colors[63], 0xFF0000FF);
    }

    #[test]
    fn test_pixelate_preserves_transparency() {
        let img = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 0]));
        assert!(pixelate(&img, 8, 8).iter().all(|&c| c == 0));
    }
}

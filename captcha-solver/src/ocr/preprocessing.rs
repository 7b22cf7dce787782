use crate::config::OcrConfig;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, GrayImage, Luma};

/// Clean a decoded bitmap up before handing it to Tesseract
///
/// 1. Downscales images larger than `max_image_dimension` (aspect ratio kept)
/// 2. Flattens transparency onto a white background
/// 3. Converts to grayscale
/// 4. Stretches contrast so the darkest pixel maps to 0 and the lightest to 255
pub fn preprocess_image(img: DynamicImage, config: &OcrConfig) -> DynamicImage {
    let img = resize_to_fit(img, config.max_image_dimension);
    let gray = flatten_to_luma(&img);
    DynamicImage::ImageLuma8(stretch_contrast(gray))
}

/// Uses Lanczos3 for downscaling; images already within bounds are returned untouched.
fn resize_to_fit(img: DynamicImage, max_dim: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if max_dim == 0 || (width <= max_dim && height <= max_dim) {
        return img;
    }

    img.resize(max_dim, max_dim, FilterType::Lanczos3)
}

/// Grayscale conversion that composites any alpha channel over white.
fn flatten_to_luma(img: &DynamicImage) -> GrayImage {
    if !img.color().has_alpha() {
        return img.to_luma8();
    }

    let luma_alpha = img.to_luma_alpha8();
    GrayImage::from_fn(luma_alpha.width(), luma_alpha.height(), |x, y| {
        let [luma, alpha] = luma_alpha.get_pixel(x, y).0;
        let (luma, alpha) = (luma as u32, alpha as u32);
        let blended = (luma * alpha + 255 * (255 - alpha)) / 255;
        Luma([blended as u8])
    })
}

/// Histogram stretching. Flat images are returned as-is.
fn stretch_contrast(gray: GrayImage) -> GrayImage {
    let (min_val, max_val) = gray
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));

    if max_val <= min_val {
        return gray;
    }

    let range = (max_val - min_val) as f32;
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let value = gray.get_pixel(x, y)[0];
        let normalized = (value - min_val) as f32 / range;
        Luma([(normalized * 255.0).round() as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn create_test_config() -> OcrConfig {
        OcrConfig::default()
    }

    #[test]
    fn test_preprocess_outputs_grayscale() {
        let img = DynamicImage::new_rgb8(100, 40);
        let processed = preprocess_image(img, &create_test_config());

        assert!(matches!(processed, DynamicImage::ImageLuma8(_)));
        assert_eq!(processed.dimensions(), (100, 40));
    }

    #[test]
    fn test_preprocess_downscales_large_image() {
        let config = OcrConfig {
            max_image_dimension: 500,
            ..create_test_config()
        };
        let processed = preprocess_image(DynamicImage::new_rgb8(2000, 1500), &config);

        let (w, h) = processed.dimensions();
        assert_eq!(w, 500);
        assert_eq!(h, 375);
    }

    #[test]
    fn test_resize_to_fit_no_change() {
        let resized = resize_to_fit(DynamicImage::new_rgb8(500, 500), 1000);
        assert_eq!(resized.dimensions(), (500, 500));
    }

    #[test]
    fn test_resize_to_fit_width_exceeded() {
        let resized = resize_to_fit(DynamicImage::new_rgb8(2000, 500), 1000);
        assert_eq!(resized.dimensions(), (1000, 250));
    }

    #[test]
    fn test_resize_to_fit_height_exceeded() {
        let resized = resize_to_fit(DynamicImage::new_rgb8(500, 2000), 1000);
        assert_eq!(resized.dimensions(), (250, 1000));
    }

    #[test]
    fn test_resize_to_fit_zero_disables_resizing() {
        let resized = resize_to_fit(DynamicImage::new_rgb8(5000, 10), 0);
        assert_eq!(resized.dimensions(), (5000, 10));
    }

    #[test]
    fn test_transparent_background_becomes_white() {
        let mut rgba = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 1, Rgba([0, 0, 0, 255]));

        let gray = flatten_to_luma(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(gray.get_pixel(0, 0)[0], 255, "transparent pixel should be white");
        assert_eq!(gray.get_pixel(1, 1)[0], 0, "opaque black glyph should stay black");
    }

    #[test]
    fn test_flatten_without_alpha_is_plain_grayscale() {
        let img = DynamicImage::new_rgb8(3, 3);
        let gray = flatten_to_luma(&img);
        assert!(gray.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_stretch_contrast_uses_full_range() {
        let mut gray = GrayImage::new(10, 10);
        for (i, pixel) in gray.pixels_mut().enumerate() {
            pixel[0] = (50 + i % 90) as u8;
        }

        let stretched = stretch_contrast(gray);
        let min = stretched.pixels().map(|p| p[0]).min().unwrap();
        let max = stretched.pixels().map(|p| p[0]).max().unwrap();
        assert_eq!(min, 0);
        assert_eq!(max, 255);
    }

    #[test]
    fn test_stretch_contrast_flat_image_unchanged() {
        let gray = GrayImage::from_pixel(10, 10, Luma([100]));
        let stretched = stretch_contrast(gray);
        assert!(stretched.pixels().all(|p| p[0] == 100));
    }
}

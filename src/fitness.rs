// Image type for comparing pixels
use image::RgbaImage;

// Rayon provides parallel iterators: `.par_chunks()` splits the work across cores
use rayon::prelude::*;

/// Total color difference between two images (lower is better)
///
/// Sum over all pixels of |ΔR| + |ΔG| + |ΔB|. The alpha channel is ignored, so
/// a pixel's stored alpha doesn't matter, only the color bytes do.
///
/// # Returns
/// 0 for identical images, up to `width * height * 3 * 255`.
///
/// # Panics
/// Panics if images have different dimensions
pub fn image_diff(source: &RgbaImage, target: &RgbaImage) -> i64 {
    // Comparing different-sized images is a programming error, not a runtime condition
    assert_eq!(
        source.dimensions(),
        target.dimensions(),
        "Images must have same dimensions"
    );

    pixel_diff(source.as_raw(), target.as_raw())
}

/// Parallel version of [`image_diff`] (same result, faster on large images)
///
/// The raw buffers are split into whole rows and each row is summed on
/// whichever rayon worker picks it up. Integer addition is associative, so the
/// total is identical to the sequential version no matter how rows are split.
pub fn image_diff_parallel(source: &RgbaImage, target: &RgbaImage) -> i64 {
    assert_eq!(
        source.dimensions(),
        target.dimensions(),
        "Images must have same dimensions"
    );

    let row_len = source.width() as usize * 4;
    if row_len == 0 {
        return 0;
    }

    source
        .as_raw()
        .par_chunks(row_len)
        .zip(target.as_raw().par_chunks(row_len))
        .map(|(s, t)| pixel_diff(s, t))
        .sum()
}

/// Sum of RGB absolute differences over two equally sized RGBA byte slices
fn pixel_diff(source: &[u8], target: &[u8]) -> i64 {
    source
        .chunks_exact(4)
        .zip(target.chunks_exact(4))
        .map(|(s, t)| {
            // Cast to i64 before subtracting: u8 arithmetic would underflow
            let dr = (s[0] as i64 - t[0] as i64).abs();
            let dg = (s[1] as i64 - t[1] as i64).abs();
            let db = (s[2] as i64 - t[2] as i64).abs();
            // s[3] and t[3] are alpha - we ignore them
            dr + dg + db
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_identical_images() {
        let img1 = RgbaImage::from_pixel(100, 100, Rgba([128, 128, 128, 255]));
        let img2 = RgbaImage::from_pixel(100, 100, Rgba([128, 128, 128, 255]));

        assert_eq!(image_diff(&img1, &img2), 0, "Identical images should have zero difference");
    }

    #[test]
    fn test_different_images() {
        // Black vs white - maximum possible difference
        let img1 = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        let img2 = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));

        assert_eq!(image_diff(&img1, &img2), 100 * 3 * 255);
    }

    #[test]
    fn test_partial_difference() {
        let img1 = RgbaImage::from_pixel(10, 10, Rgba([128, 128, 128, 255]));
        let mut img2 = img1.clone();
        img2.put_pixel(3, 4, Rgba([138, 120, 128, 255]));

        assert_eq!(image_diff(&img1, &img2), 10 + 8);
    }

    #[test]
    fn test_alpha_ignored() {
        let img1 = RgbaImage::from_pixel(100, 100, Rgba([128, 128, 128, 255]));
        let img2 = RgbaImage::from_pixel(100, 100, Rgba([128, 128, 128, 0]));

        assert_eq!(image_diff(&img1, &img2), 0, "Alpha channel should be ignored");
    }

    #[test]
    fn test_parallel_equals_sequential() {
        let mut img1 = RgbaImage::from_pixel(97, 53, Rgba([100, 150, 200, 255]));
        let img2 = RgbaImage::from_pixel(97, 53, Rgba([110, 140, 190, 255]));
        for x in 0..97 {
            img1.put_pixel(x, x % 53, Rgba([x as u8, 0, 255, 255]));
        }

        assert_eq!(
            image_diff(&img1, &img2),
            image_diff_parallel(&img1, &img2),
            "Sequential and parallel should give identical results"
        );
    }

    #[test]
    fn test_empty_images() {
        let img1 = RgbaImage::new(0, 0);
        let img2 = RgbaImage::new(0, 0);
        assert_eq!(image_diff(&img1, &img2), 0);
        assert_eq!(image_diff_parallel(&img1, &img2), 0);
    }

    #[test]
    #[should_panic(expected = "Images must have same dimensions")]
    fn test_different_sizes_panics() {
        let img1 = RgbaImage::from_pixel(100, 100, Rgba([128, 128, 128, 255]));
        let img2 = RgbaImage::from_pixel(200, 200, Rgba([128, 128, 128, 255]));

        image_diff(&img1, &img2);
    }
}

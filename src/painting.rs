// Polygon gene type from the genes module
use crate::genes::{Point, Polygon};

// Image types from the image crate
// Rgba = Red, Green, Blue, Alpha (color with transparency)
// RgbaImage = 2D image with RGBA pixels
use image::{Rgba, RgbaImage};

// Drawing functions from imageproc
// `Blend` wraps an image so every pixel drawn onto it is alpha-composited
// ("over") with what's already there, instead of overwriting it
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut, Blend};
use imageproc::point::Point as PixelPoint;

/// Rasterize a polygon list into a fresh `width x height` RGBA buffer
///
/// The buffer starts fully transparent. Polygons are drawn in list order, so
/// later ones land on top of earlier ones (painter's algorithm). Each polygon
/// is filled and then its closed outline is stroked one pixel wide, both in the
/// polygon's own color.
///
/// This is a pure function of its inputs: the same polygons always give
/// byte-identical output.
///
/// # Panics
/// Panics if a polygon has fewer than 2 points. `Polygon` never allows that,
/// so hitting it means something upstream broke the invariant.
pub fn render(width: u32, height: u32, polygons: &[Polygon]) -> RgbaImage {
    // **Rust Concept: Tuple structs**
    // `Blend(img)` moves the image into the wrapper; `.0` moves it back out
    let mut canvas = Blend(RgbaImage::new(width, height));

    for polygon in polygons {
        draw_polygon_with_alpha(&mut canvas, polygon.points(), Rgba(polygon.color));
    }

    canvas.0
}

/// Fill then stroke one closed outline onto a blending canvas
fn draw_polygon_with_alpha(canvas: &mut Blend<RgbaImage>, points: &[Point], color: Rgba<u8>) {
    assert!(
        points.len() >= 2,
        "cannot draw a polygon with {} points",
        points.len()
    );

    // Fully transparent: compositing would leave every pixel as it is
    if color.0[3] == 0 {
        return;
    }

    let outline = fill_outline(points);
    // Fewer than 3 distinct corners has no interior; the stroke below still draws it
    if outline.len() >= 3 {
        draw_polygon_mut(canvas, &outline, color);
    }

    // Stroke every edge, including the closing edge from the last point back to the first
    for (i, start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        draw_line_segment_mut(
            canvas,
            (start.x as f32, start.y as f32),
            (end.x as f32, end.y as f32),
            color,
        );
    }
}

/// Convert a polygon outline to imageproc points for filling
///
/// imageproc closes the outline itself and rejects one whose last point equals
/// its first, so trailing repeats of the first point are dropped. They only
/// describe a zero-length closing edge.
fn fill_outline(points: &[Point]) -> Vec<PixelPoint<i32>> {
    let mut outline: Vec<PixelPoint<i32>> = points
        .iter()
        .map(|p| PixelPoint::new(p.x, p.y))
        .collect();

    while outline.len() > 1 && outline.first() == outline.last() {
        outline.pop();
    }

    outline
}

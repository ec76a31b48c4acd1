/// Filter rendering pipeline
///
/// Turns the selected source bitmap into a processed RGBA bitmap. Each
/// operation delegates to the `image` crate where it has the building
/// block (blur, unsharpen, 3x3 kernels, resizing) and falls back to a
/// small per-pixel pass where it does not (sepia, vignette, crystallize).
///
/// Only the parameters a filter declares in its table are ever read here;
/// the dispatch below passes each operation exactly the values it needs.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use super::{FilterKind, ParamKey};
use crate::state::params::FilterParams;

/// Render `source` through the given filter.
///
/// Returns `None` when no valid output bitmap can be produced (for
/// example a zero-sized source). Callers treat that as "keep showing
/// whatever was rendered last".
pub fn render(
    source: &DynamicImage,
    kind: FilterKind,
    params: &FilterParams,
) -> Option<RgbaImage> {
    let input = source.to_rgba8();
    if input.width() == 0 || input.height() == 0 {
        return None;
    }

    let output = match kind {
        FilterKind::Crystallize => crystallize(&input, params.get(ParamKey::Radius)),
        FilterKind::Edges => edges(&input, params.get(ParamKey::Intensity)),
        FilterKind::GaussianBlur => gaussian_blur(&input, params.get(ParamKey::Radius)),
        FilterKind::Pixellate => pixellate(&input, params.get(ParamKey::Scale)),
        FilterKind::SepiaTone => sepia_tone(&input, params.get(ParamKey::Intensity)),
        FilterKind::UnsharpMask => unsharp_mask(
            &input,
            params.get(ParamKey::Radius),
            params.get(ParamKey::Intensity),
        ),
        FilterKind::Vignette => vignette(
            &input,
            params.get(ParamKey::Intensity),
            params.get(ParamKey::Radius),
        ),
    };

    Some(output)
}

/// The radius slider is in pixels; the `image` crate blurs take a gaussian
/// sigma, so divide down and keep it strictly positive (sigma 0 is not a
/// valid kernel).
fn blur_sigma(radius: f32) -> f32 {
    (radius / 10.0).max(0.1)
}

fn gaussian_blur(input: &RgbaImage, radius: f32) -> RgbaImage {
    imageops::blur(input, blur_sigma(radius))
}

fn unsharp_mask(input: &RgbaImage, radius: f32, intensity: f32) -> RgbaImage {
    let sharpened = imageops::unsharpen(input, blur_sigma(radius), 0);
    // Intensity fades between the untouched image and the fully sharpened one
    blend(input, &sharpened, intensity.clamp(0.0, 1.0))
}

fn edges(input: &RgbaImage, intensity: f32) -> RgbaImage {
    // Laplacian kernel scaled by intensity; stronger intensity, brighter edges
    let s = intensity.max(0.0);
    let kernel = [
        -s, -s, -s, //
        -s, 8.0 * s, -s, //
        -s, -s, -s,
    ];
    let mut out = imageops::filter3x3(input, &kernel);
    // The kernel sums to zero, which wipes the alpha channel; restore it
    for pixel in out.pixels_mut() {
        pixel[3] = 255;
    }
    out
}

fn pixellate(input: &RgbaImage, scale: f32) -> RgbaImage {
    let (width, height) = input.dimensions();
    let cell = scale.max(1.0);
    let small_w = ((width as f32 / cell).round() as u32).max(1);
    let small_h = ((height as f32 / cell).round() as u32).max(1);

    // Average each block down, then blow the blocks back up unfiltered
    let small = imageops::resize(input, small_w, small_h, FilterType::Triangle);
    imageops::resize(&small, width, height, FilterType::Nearest)
}

fn sepia_tone(input: &RgbaImage, intensity: f32) -> RgbaImage {
    let amount = intensity.clamp(0.0, 1.0);
    let mut out = input.clone();
    for pixel in out.pixels_mut() {
        let r = pixel[0] as f32;
        let g = pixel[1] as f32;
        let b = pixel[2] as f32;

        let sepia_r = (0.393 * r + 0.769 * g + 0.189 * b).min(255.0);
        let sepia_g = (0.349 * r + 0.686 * g + 0.168 * b).min(255.0);
        let sepia_b = (0.272 * r + 0.534 * g + 0.131 * b).min(255.0);

        pixel[0] = lerp(r, sepia_r, amount) as u8;
        pixel[1] = lerp(g, sepia_g, amount) as u8;
        pixel[2] = lerp(b, sepia_b, amount) as u8;
    }
    out
}

fn vignette(input: &RgbaImage, intensity: f32, radius: f32) -> RgbaImage {
    let (width, height) = input.dimensions();
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt();

    // Inside `radius` pixels of the center the image is untouched; beyond
    // it the falloff ramps up to the corners
    let clear = radius.clamp(0.0, max_dist);
    let amount = intensity.clamp(0.0, 1.0);

    let mut out = input.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist <= clear {
            continue;
        }
        let falloff = ((dist - clear) / (max_dist - clear).max(1.0)).clamp(0.0, 1.0);
        let keep = 1.0 - amount * falloff;
        pixel[0] = (pixel[0] as f32 * keep) as u8;
        pixel[1] = (pixel[1] as f32 * keep) as u8;
        pixel[2] = (pixel[2] as f32 * keep) as u8;
    }
    out
}

/// Jittered-grid mosaic: each pixel takes the color under the nearest cell
/// seed, producing irregular crystal-like facets sized by `radius`.
fn crystallize(input: &RgbaImage, radius: f32) -> RgbaImage {
    let (width, height) = input.dimensions();
    let cell = radius.max(2.0);
    let cells_x = ((width as f32 / cell).ceil() as i64).max(1);
    let cells_y = ((height as f32 / cell).ceil() as i64).max(1);

    let seed_at = |cx: i64, cy: i64| -> (f32, f32) {
        let jx = cell_jitter(cx, cy, 0);
        let jy = cell_jitter(cx, cy, 1);
        ((cx as f32 + jx) * cell, (cy as f32 + jy) * cell)
    };

    let mut out = RgbaImage::new(width, height);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let home_x = (x as f32 / cell) as i64;
        let home_y = (y as f32 / cell) as i64;

        // The nearest seed is in this cell or one of its eight neighbors
        let mut best = (f32::MAX, (0.0, 0.0));
        for cy in (home_y - 1)..=(home_y + 1) {
            for cx in (home_x - 1)..=(home_x + 1) {
                if cx < 0 || cy < 0 || cx >= cells_x || cy >= cells_y {
                    continue;
                }
                let (sx, sy) = seed_at(cx, cy);
                let dx = sx - x as f32;
                let dy = sy - y as f32;
                let dist = dx * dx + dy * dy;
                if dist < best.0 {
                    best = (dist, (sx, sy));
                }
            }
        }

        let sx = (best.1 .0 as u32).min(width - 1);
        let sy = (best.1 .1 as u32).min(height - 1);
        *pixel = *input.get_pixel(sx, sy);
    }
    out
}

/// Deterministic per-cell jitter in [0, 1), so the facet layout is stable
/// across recomputations of the same image.
fn cell_jitter(cx: i64, cy: i64, salt: u32) -> f32 {
    let mut v = (cx as u64)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add((cy as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F))
        .wrapping_add(salt as u64);
    v ^= v >> 29;
    v = v.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    v ^= v >> 32;
    (v & 0xFFFF) as f32 / 65536.0
}

#[inline]
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

fn blend(a: &RgbaImage, b: &RgbaImage, t: f32) -> RgbaImage {
    let mut out = a.clone();
    for (pixel, other) in out.pixels_mut().zip(b.pixels()) {
        for c in 0..3 {
            pixel[c] = lerp(pixel[c] as f32, other[c] as f32, t) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checkerboard(size: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([230, 40, 40, 255])
            } else {
                Rgba([40, 40, 230, 255])
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_every_filter_renders() {
        let source = checkerboard(16);
        let params = FilterParams::default();

        for kind in FilterKind::ALL {
            let output = render(&source, kind, &params)
                .unwrap_or_else(|| panic!("{} produced no output", kind.label()));
            assert_eq!(output.dimensions(), (16, 16));
        }
    }

    #[test]
    fn test_zero_sized_source_yields_none() {
        let source = DynamicImage::new_rgba8(0, 0);
        let params = FilterParams::default();
        assert!(render(&source, FilterKind::SepiaTone, &params).is_none());
    }

    #[test]
    fn test_unrelated_parameters_do_not_change_output() {
        // Sepia only reads intensity; radius and scale must be inert
        let source = checkerboard(8);
        let mut a = FilterParams::default();
        let mut b = FilterParams::default();
        a.radius = 3.0;
        a.scale = 1.0;
        b.radius = 180.0;
        b.scale = 19.0;

        let out_a = render(&source, FilterKind::SepiaTone, &a).unwrap();
        let out_b = render(&source, FilterKind::SepiaTone, &b).unwrap();
        assert_eq!(out_a.as_raw(), out_b.as_raw());
    }

    #[test]
    fn test_sepia_intensity_zero_is_identity() {
        let source = checkerboard(8);
        let mut params = FilterParams::default();
        params.intensity = 0.0;

        let out = render(&source, FilterKind::SepiaTone, &params).unwrap();
        assert_eq!(out.as_raw(), source.to_rgba8().as_raw());
    }

    #[test]
    fn test_sepia_full_intensity_warms_gray() {
        let gray = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            4,
            4,
            Rgba([128, 128, 128, 255]),
        ));
        let mut params = FilterParams::default();
        params.intensity = 1.0;

        let out = render(&gray, FilterKind::SepiaTone, &params).unwrap();
        let pixel = out.get_pixel(2, 2);
        assert!(pixel[0] > pixel[1], "sepia should favor red over green");
        assert!(pixel[1] > pixel[2], "sepia should favor green over blue");
    }

    #[test]
    fn test_vignette_darkens_corners_not_center() {
        let gray = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            32,
            32,
            Rgba([200, 200, 200, 255]),
        ));
        let mut params = FilterParams::default();
        params.intensity = 1.0;
        params.radius = 4.0;

        let out = render(&gray, FilterKind::Vignette, &params).unwrap();
        let center = out.get_pixel(16, 16);
        let corner = out.get_pixel(0, 0);
        assert_eq!(center[0], 200);
        assert!(corner[0] < 200, "corner should be darkened");
    }

    #[test]
    fn test_edges_output_stays_opaque() {
        let source = checkerboard(8);
        let params = FilterParams::default();

        let out = render(&source, FilterKind::Edges, &params).unwrap();
        assert!(out.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_pixellate_flattens_cells() {
        let source = checkerboard(16);
        let mut params = FilterParams::default();
        params.scale = 8.0;

        let out = render(&source, FilterKind::Pixellate, &params).unwrap();
        // Everything inside one 8x8 cell collapses to a single color
        let anchor = out.get_pixel(1, 1);
        for y in 1..7 {
            for x in 1..7 {
                assert_eq!(out.get_pixel(x, y), anchor);
            }
        }
    }

    #[test]
    fn test_crystallize_is_deterministic() {
        let source = checkerboard(16);
        let params = FilterParams::default();

        let first = render(&source, FilterKind::Crystallize, &params).unwrap();
        let second = render(&source, FilterKind::Crystallize, &params).unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
    }
}

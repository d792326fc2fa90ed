//! Pixel-level verifications for image subjects (feature `image`).

use image::RgbaImage;

use crate::report::AssertionResult;

use super::builder::Expectation;

impl Expectation<RgbaImage> {
    /// Assert the image has the given width and height.
    pub fn to_have_dimensions(self, width: u32, height: u32) -> Self {
        let (w, h) = self.subject.dimensions();
        let description = format!("image to have dimensions {}x{}", width, height);
        let result = if (w, h) == (width, height) {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, format!("was {}x{}", w, h))
        };
        self.verify_image(result)
    }

    /// Assert both images have the same width and height.
    pub fn to_have_same_dimensions_as(self, other: &RgbaImage) -> Self {
        let (w, h) = self.subject.dimensions();
        let (ow, oh) = other.dimensions();
        let description = format!("image to have the same dimensions as a {}x{} image", ow, oh);
        let result = if (w, h) == (ow, oh) {
            AssertionResult::pass(description)
        } else {
            AssertionResult::fail(description, format!("was {}x{}", w, h))
        };
        self.verify_image(result)
    }

    /// Assert both images have identical dimensions and pixels.
    pub fn to_equal_image(self, other: &RgbaImage) -> Self {
        self.to_equal_image_within(other, 0)
    }

    /// Assert both images have identical dimensions and every channel of
    /// every pixel differs by at most `max_channel_delta`.
    pub fn to_equal_image_within(self, other: &RgbaImage, max_channel_delta: u8) -> Self {
        let (w, h) = self.subject.dimensions();
        let (ow, oh) = other.dimensions();
        let description = if max_channel_delta == 0 {
            "images to be identical".to_string()
        } else {
            format!(
                "images to match within a channel delta of {}",
                max_channel_delta
            )
        };
        if (w, h) != (ow, oh) {
            let result = AssertionResult::fail(
                description,
                format!("dimensions differ: {}x{} vs {}x{}", w, h, ow, oh),
            );
            return self.verify_image(result);
        }
        let mut mismatch: Option<(u32, u32)> = None;
        'rows: for y in 0..h {
            for x in 0..w {
                let a = self.subject.get_pixel(x, y);
                let b = other.get_pixel(x, y);
                let close = a
                    .0
                    .iter()
                    .zip(b.0.iter())
                    .all(|(ca, cb)| ca.abs_diff(*cb) <= max_channel_delta);
                if !close {
                    mismatch = Some((x, y));
                    break 'rows;
                }
            }
        }
        let result = match mismatch {
            None => AssertionResult::pass(description),
            Some((x, y)) => AssertionResult::fail(
                description,
                format!(
                    "first differing pixel at ({}, {}): {:?} vs {:?}",
                    x,
                    y,
                    self.subject.get_pixel(x, y),
                    other.get_pixel(x, y)
                ),
            ),
        };
        self.verify_image(result)
    }

    // RgbaImage's Debug output dumps the whole buffer, so image failures
    // render dimensions instead of going through the generic verify.
    fn verify_image(self, result: AssertionResult) -> Self {
        if result.passed {
            return self;
        }
        let (w, h) = self.subject.dimensions();
        let subject_line = format!("  subject: a {}x{} image\n", w, h);
        self.report.raise(&result, &subject_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluent::builder::expect;
    use image::Rgba;

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(pixel))
    }

    #[test]
    fn test_dimensions() {
        let img = solid(4, 2, [255, 0, 0, 255]);
        expect(img.clone())
            .to_have_dimensions(4, 2)
            .to_have_same_dimensions_as(&solid(4, 2, [0, 0, 0, 255]));
    }

    #[test]
    fn test_identical_images_are_equal() {
        let img = solid(3, 3, [10, 20, 30, 255]);
        expect(img.clone()).to_equal_image(&img);
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let a = solid(2, 2, [100, 100, 100, 255]);
        let b = solid(2, 2, [105, 100, 95, 255]);
        expect(a).to_equal_image_within(&b, 5);
    }

    #[test]
    #[should_panic(expected = "first differing pixel at (0, 0)")]
    fn test_pixel_difference_is_located() {
        let a = solid(2, 2, [100, 100, 100, 255]);
        let b = solid(2, 2, [110, 100, 100, 255]);
        expect(a).to_equal_image_within(&b, 5);
    }

    #[test]
    #[should_panic(expected = "dimensions differ")]
    fn test_dimension_mismatch_fails_equality() {
        let a = solid(2, 2, [0, 0, 0, 255]);
        let b = solid(3, 2, [0, 0, 0, 255]);
        expect(a).to_equal_image(&b);
    }
}

//! Assertion helpers for tests.

use pixel_filters::Image;
use pretty_assertions::assert_eq;

/// Assert two images are identical, reporting the first differing pixel
pub fn assert_images_eq(actual: &Image, expected: &Image) {
    assert_eq!(
        (actual.width(), actual.height()),
        (expected.width(), expected.height()),
        "Image dimensions differ"
    );
    if let Some((i, (a, e))) = actual
        .pixels()
        .iter()
        .zip(expected.pixels())
        .enumerate()
        .find(|(_, (a, e))| a != e)
    {
        let (x, y) = (i % actual.width(), i / actual.width());
        assert_eq!(a, e, "First differing pixel at ({x}, {y})");
    }
}

/// Assert every pixel has R = G = B
pub fn assert_grayscale(image: &Image) {
    assert!(
        image.is_grayscale(),
        "Expected a grayscale image, found colored pixel {:?}",
        image.pixels().iter().find(|p| !p.is_gray())
    );
}

/// Assert every channel value is one of `allowed`
pub fn assert_channels_within(image: &Image, allowed: &[u8]) {
    for px in image.pixels() {
        for c in px.channels() {
            assert!(
                allowed.contains(&c),
                "Channel value {c} not in {allowed:?} (pixel {px:?})"
            );
        }
    }
}

/// Assert the image is not identical to `other`
pub fn assert_images_differ(actual: &Image, other: &Image) {
    assert!(actual != other, "Expected images to differ");
}

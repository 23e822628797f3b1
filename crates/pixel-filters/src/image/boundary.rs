//! Mirror boundary handling for neighborhood filters.

/// Map a possibly out-of-range coordinate back into `0..extent`.
///
/// Negative coordinates reflect as `-coord`; coordinates at or past the end
/// reflect as `2 * extent - coord - 1`. The two rules are applied once, in
/// that order, so a coordinate more than one extent away is not fully folded
/// back. Whatever remains out of range after that single pass is clamped to
/// the nearest edge, which keeps kernels larger than the image in bounds.
///
/// `extent` must be non-zero.
///
/// ```
/// use pixel_filters::image::reflect;
/// assert_eq!(reflect(-1, 10), 1);
/// assert_eq!(reflect(10, 10), 9);
/// assert_eq!(reflect(-1, 1), 0);
/// ```
#[inline]
pub fn reflect(coord: i64, extent: usize) -> usize {
    debug_assert!(extent > 0, "reflect() needs a non-empty axis");
    let extent = extent as i64;
    let mut c = coord;
    if c < 0 {
        c = -c;
    }
    if c >= extent {
        c = 2 * extent - c - 1;
    }
    c.clamp(0, extent - 1) as usize
}

//! Test images and kernels.

use pixel_filters::{Image, Rgba};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeds shared by tests that need reproducible noise
pub mod seeds {
    pub const NOISE: u64 = 0x1a2b_3c4d;
    pub const SMALL: u64 = 7;
}

/// Horizontal red ramp, vertical green ramp, constant blue
pub fn gradient(width: usize, height: usize) -> Image {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                let r = (x * 255 / width.saturating_sub(1).max(1)) as u8;
                let g = (y * 255 / height.saturating_sub(1).max(1)) as u8;
                Rgba::opaque(r, g, 96)
            })
        })
        .collect();
    Image::new(width, height, pixels).unwrap()
}

/// Flat image of one gray value
pub fn flat_gray(width: usize, height: usize, value: u8) -> Image {
    Image::filled(width, height, Rgba::gray(value))
}

/// Opaque random colors from a fixed seed
pub fn noise(width: usize, height: usize, seed: u64) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);
    let pixels = (0..width * height)
        .map(|_| Rgba::opaque(rng.gen(), rng.gen(), rng.gen()))
        .collect();
    Image::new(width, height, pixels).unwrap()
}

/// 3x3 kernel with a single 1 in the centre
pub fn identity_kernel() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 0.0],
    ]
}

/// 3x3 box kernel
pub fn box_kernel() -> Vec<Vec<f64>> {
    vec![vec![1.0; 3]; 3]
}

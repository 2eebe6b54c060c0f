use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A filled disc drawn by [`blob_field_u8`].
#[derive(Clone, Copy, Debug)]
pub struct Disc {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
}

/// Bright background with dark discs, the usual look of stained nuclei
/// under bright-field illumination.
pub fn blob_field_u8(width: usize, height: usize, discs: &[Disc], fg: u8, bg: u8) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![bg; width * height];
    for d in discs {
        let r2 = d.radius * d.radius;
        for y in 0..height {
            for x in 0..width {
                let dx = x as f32 - d.cx;
                let dy = y as f32 - d.cy;
                if dx * dx + dy * dy <= r2 {
                    img[y * width + x] = fg;
                }
            }
        }
    }
    img
}

/// Regular grid of well separated discs, `cols` x `rows` of them.
pub fn disc_grid(width: usize, height: usize, cols: usize, rows: usize, radius: f32) -> Vec<Disc> {
    let sx = width as f32 / cols as f32;
    let sy = height as f32 / rows as f32;
    let mut discs = Vec::with_capacity(cols * rows);
    for j in 0..rows {
        for i in 0..cols {
            discs.push(Disc {
                cx: (i as f32 + 0.5) * sx,
                cy: (j as f32 + 0.5) * sy,
                radius,
            });
        }
    }
    discs
}

/// Independent Bernoulli foreground cells with probability `p`.
pub fn noise_mask(width: usize, height: usize, p: f64, seed: u64) -> Vec<bool> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height).map(|_| rng.gen_bool(p)).collect()
}

//! Orthonormal transforms over a row-major plane of one channel.

use std::f64::consts::PI;
use std::sync::OnceLock;

/// side of a DCT block
pub(crate) const BLOCK: usize = 8;

/// `(row, column)` of the first AC coefficients of a block in zigzag order
pub(crate) const ZIGZAG_AC: [(usize, usize); 14] = [
    (0, 1),
    (1, 0),
    (2, 0),
    (1, 1),
    (0, 2),
    (0, 3),
    (1, 2),
    (2, 1),
    (3, 0),
    (4, 0),
    (3, 1),
    (2, 2),
    (1, 3),
    (0, 4),
];

/// no basis function of a block exceeds this magnitude outside of DC
pub(crate) const MAX_AC_BASIS: f64 = 0.25;

/// orthonormal DCT-II matrix, `basis[k][n]` with rows as frequencies
static BASIS: OnceLock<[[f64; BLOCK]; BLOCK]> = OnceLock::new();

fn basis() -> &'static [[f64; BLOCK]; BLOCK] {
    BASIS.get_or_init(|| {
        let mut basis = [[0.0; BLOCK]; BLOCK];
        let n_f = BLOCK as f64;
        for (k, row) in basis.iter_mut().enumerate() {
            let scale = if k == 0 {
                (1.0 / n_f).sqrt()
            } else {
                (2.0 / n_f).sqrt()
            };
            for (n, b) in row.iter_mut().enumerate() {
                *b = scale * (PI * (2 * n + 1) as f64 * k as f64 / (2.0 * n_f)).cos();
            }
        }
        basis
    })
}

fn forward_1d(input: &[f64; BLOCK]) -> [f64; BLOCK] {
    let basis = basis();
    let mut out = [0.0; BLOCK];
    for (k, o) in out.iter_mut().enumerate() {
        *o = basis[k].iter().zip(input).map(|(b, x)| b * x).sum();
    }
    out
}

fn inverse_1d(input: &[f64; BLOCK]) -> [f64; BLOCK] {
    let basis = basis();
    let mut out = [0.0; BLOCK];
    for (n, o) in out.iter_mut().enumerate() {
        *o = input.iter().enumerate().map(|(k, x)| basis[k][n] * x).sum();
    }
    out
}

/// Blockwise 2-D DCT-II done in place, like a JPEG encoder does it.
///
/// Every full 8x8 block is replaced by its coefficients, `(u, v)` of a block lands on the
/// pixel `(row + u, column + v)`. Pixels of partial blocks at the right and bottom edge
/// keep their value.
pub(crate) fn block_dct(plane: &mut [f64], width: usize, height: usize) {
    for_each_block(plane, width, height, forward_1d);
}

pub(crate) fn block_idct(plane: &mut [f64], width: usize, height: usize) {
    for_each_block(plane, width, height, inverse_1d);
}

/// number of full blocks `(across, down)`
pub(crate) fn block_grid(width: usize, height: usize) -> (usize, usize) {
    (width / BLOCK, height / BLOCK)
}

fn for_each_block(
    plane: &mut [f64],
    width: usize,
    height: usize,
    apply: fn(&[f64; BLOCK]) -> [f64; BLOCK],
) {
    let (across, down) = block_grid(width, height);
    for by in 0..down {
        for bx in 0..across {
            let origin = by * BLOCK * width + bx * BLOCK;
            let mut block = [[0.0; BLOCK]; BLOCK];
            for (y, row) in block.iter_mut().enumerate() {
                let start = origin + y * width;
                row.copy_from_slice(&plane[start..start + BLOCK]);
                *row = apply(row);
            }
            for x in 0..BLOCK {
                let column = apply(&block.map(|row| row[x]));
                for (y, value) in column.into_iter().enumerate() {
                    plane[origin + y * width + x] = value;
                }
            }
        }
    }
}

/// Geometry of a single level Haar decomposition.
///
/// Every band has `height / 2` rows and `ceil(width / 2)` columns. An odd last column
/// is paired with itself, an odd last row is not part of any band.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HaarLayout {
    width: usize,
    height: usize,
}

/// subbands in the order they are laid out by [`HaarLayout::forward`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Subband {
    Approximation,
    HorizontalDetail,
    VerticalDetail,
    DiagonalDetail,
}

impl Subband {
    const ALL: [Subband; 4] = [
        Subband::Approximation,
        Subband::HorizontalDetail,
        Subband::VerticalDetail,
        Subband::DiagonalDetail,
    ];
}

impl HaarLayout {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub(crate) fn band_rows(&self) -> usize {
        self.height / 2
    }

    pub(crate) fn band_columns(&self) -> usize {
        self.width.div_ceil(2)
    }

    pub(crate) fn band_len(&self) -> usize {
        self.band_rows() * self.band_columns()
    }

    /// position of a band inside the output of [`HaarLayout::forward`]
    pub(crate) fn band_range(&self, band: Subband) -> std::ops::Range<usize> {
        let start = band as usize * self.band_len();
        start..start + self.band_len()
    }

    /// where the `i`th coefficient of every band lives
    fn band_offsets(&self, i: usize) -> [usize; 4] {
        Subband::ALL.map(|band| self.band_range(band).start + i)
    }

    /// the four pixel positions of a block, the right ones repeat the left on an odd edge
    fn block(&self, row: usize, column: usize) -> [usize; 4] {
        let (x, y) = (2 * column, 2 * row);
        let right = (x + 1).min(self.width - 1);
        [
            y * self.width + x,
            y * self.width + right,
            (y + 1) * self.width + x,
            (y + 1) * self.width + right,
        ]
    }

    /// bands `[approximation | horizontal | vertical | diagonal]`
    pub(crate) fn forward(&self, plane: &[f64]) -> Vec<f64> {
        let mut bands = vec![0.0; 4 * self.band_len()];
        for row in 0..self.band_rows() {
            for column in 0..self.band_columns() {
                let [a, b, c, d] = self.block(row, column).map(|i| plane[i]);
                let [ll, h, v, dd] = self.band_offsets(row * self.band_columns() + column);
                bands[ll] = (a + b + c + d) / 2.0;
                bands[h] = (a + b - c - d) / 2.0;
                bands[v] = (a - b + c - d) / 2.0;
                bands[dd] = (a - b - c + d) / 2.0;
            }
        }

        bands
    }

    /// Writes the reconstruction into `plane`, pixels outside the bands keep their value
    pub(crate) fn inverse(&self, bands: &[f64], plane: &mut [f64]) {
        for row in 0..self.band_rows() {
            for column in 0..self.band_columns() {
                let [ll, h, v, d] = self
                    .band_offsets(row * self.band_columns() + column)
                    .map(|i| bands[i]);
                let [pa, pb, pc, pd] = self.block(row, column);
                plane[pa] = (ll + h + v + d) / 2.0;
                plane[pc] = (ll - h + v - d) / 2.0;
                if pb != pa {
                    plane[pb] = (ll + h - v - d) / 2.0;
                    plane[pd] = (ll - h - v + d) / 2.0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-9, "{x} != {y}");
        }
    }

    #[test]
    fn dct_of_a_flat_block_is_only_dc() {
        let mut plane = vec![10.0; 64];
        block_dct(&mut plane, 8, 8);

        assert!((plane[0] - 80.0).abs() < 1e-9);
        assert!(plane[1..].iter().all(|c| c.abs() < 1e-9));
    }

    #[test]
    fn block_dct_is_invertible_and_keeps_energy() {
        let original: Vec<f64> = (0..16 * 8).map(|i| ((i * 37) % 255) as f64).collect();
        let mut plane = original.clone();

        block_dct(&mut plane, 16, 8);
        let energy = |v: &[f64]| v.iter().map(|x| x * x).sum::<f64>();
        assert!((energy(&plane) - energy(&original)).abs() < 1e-9 * energy(&original));

        block_idct(&mut plane, 16, 8);
        assert_close(&plane, &original);
    }

    #[test]
    fn partial_blocks_at_the_edges_are_left_alone() {
        let original: Vec<f64> = (0..11 * 10).map(|i| (i % 200) as f64).collect();
        let mut plane = original.clone();

        block_dct(&mut plane, 11, 10);

        assert_eq!(block_grid(11, 10), (1, 1));
        for y in 0..10 {
            for x in 0..11 {
                if x >= 8 || y >= 8 {
                    assert_eq!(plane[y * 11 + x], original[y * 11 + x]);
                }
            }
        }
    }

    #[test]
    fn ac_basis_functions_stay_below_a_quarter() {
        for &(u, v) in &ZIGZAG_AC {
            let mut plane = vec![0.0; 64];
            plane[u * BLOCK + v] = 1.0;
            block_idct(&mut plane, 8, 8);

            let peak = plane.iter().fold(0.0f64, |m, p| m.max(p.abs()));
            assert!(peak <= MAX_AC_BASIS + 1e-9, "({u}, {v}) peaks at {peak}");
        }
    }

    #[test]
    fn haar_is_invertible_on_even_planes() {
        let plane: Vec<f64> = (0..24).map(|i| ((i * 53) % 255) as f64).collect();
        let layout = HaarLayout::new(6, 4);

        let mut restored = vec![0.0; plane.len()];
        layout.inverse(&layout.forward(&plane), &mut restored);

        assert_close(&restored, &plane);
    }

    #[test]
    fn haar_repeats_an_odd_column_and_leaves_an_odd_row() {
        let plane: Vec<f64> = (0..15).map(|i| (i * 7) as f64).collect();
        let layout = HaarLayout::new(5, 3);
        assert_eq!(layout.band_rows(), 1);
        assert_eq!(layout.band_columns(), 3);

        let bands = layout.forward(&plane);
        // last block pairs column 4 with itself, no vertical or diagonal detail
        assert_eq!(bands[layout.band_range(Subband::VerticalDetail)][2], 0.0);
        assert_eq!(bands[layout.band_range(Subband::DiagonalDetail)][2], 0.0);

        let mut restored = vec![-1.0; plane.len()];
        layout.inverse(&bands, &mut restored);
        assert_close(&restored[..10], &plane[..10]);
        assert!(restored[10..].iter().all(|&v| v == -1.0));
    }

    #[test]
    fn horizontal_detail_is_top_minus_bottom() {
        let plane = vec![10.0, 10.0, 4.0, 4.0];
        let layout = HaarLayout::new(2, 2);

        let bands = layout.forward(&plane);

        assert_eq!(bands[layout.band_range(Subband::HorizontalDetail)], [6.0]);
    }
}

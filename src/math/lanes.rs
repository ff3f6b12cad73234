//! Lane permutation table.
//!
//! Every lane reordering the engine performs is named here once, as an
//! SSE-style 8-bit immediate: two bits per destination lane, lane 0 in the
//! lowest bits. The SSE vector passes the masks straight to `shufps`; the
//! array fallback decodes them with [`lane`]. Two-source shuffles take
//! destination lanes 0 and 1 from the first operand and lanes 2 and 3 from
//! the second one.

/// Build permutation mask from destination lane sources
pub const fn mask(sources: [u32; 4]) -> i32 {
    (sources[0] | (sources[1] << 2) | (sources[2] << 4) | (sources[3] << 6)) as i32
}

/// Source lane of destination lane `index` under `mask`
pub const fn lane(mask: i32, index: usize) -> usize {
    ((mask >> (index * 2)) & 0b11) as usize
}

/// Swizzle: (1, 0, 3, 2)
pub const SWAP_PAIRS: i32 = mask([1, 0, 3, 2]);

/// Swizzle: (2, 3, 0, 1)
pub const SWAP_HALVES: i32 = mask([2, 3, 0, 1]);

/// Swizzle: (0, 0, 0, 0)
pub const BROADCAST_X: i32 = mask([0, 0, 0, 0]);

/// Swizzle: (1, 1, 1, 1)
pub const BROADCAST_Y: i32 = mask([1, 1, 1, 1]);

/// Swizzle: (2, 2, 2, 2)
pub const BROADCAST_Z: i32 = mask([2, 2, 2, 2]);

/// Swizzle: (3, 3, 3, 3)
pub const BROADCAST_W: i32 = mask([3, 3, 3, 3]);

/// Swizzle: (1, 2, 0, 3), rotates xyz left, keeps w
pub const ROTATE_XYZ_LEFT: i32 = mask([1, 2, 0, 3]);

/// Swizzle: (2, 0, 1, 3), rotates xyz right, keeps w
pub const ROTATE_XYZ_RIGHT: i32 = mask([2, 0, 1, 3]);

/// Shuffle: (a0, a1, b0, b1)
pub const LOW_HALVES: i32 = mask([0, 1, 0, 1]);

/// Shuffle: (a2, a3, b2, b3)
pub const HIGH_HALVES: i32 = mask([2, 3, 2, 3]);

/// Shuffle: (a0, a2, b0, b2)
pub const EVEN_LANES: i32 = mask([0, 2, 0, 2]);

/// Shuffle: (a1, a3, b1, b3)
pub const ODD_LANES: i32 = mask([1, 3, 1, 3]);

/// Element permutation of a column-major 4x4 transpose:
/// `transposed[i] = source[TRANSPOSE[i]]`.
pub const TRANSPOSE: [usize; 16] = {
    let mut table = [0usize; 16];
    let mut i = 0;

    while i < 16 {
        let (row, col) = (i % 4, i / 4);
        table[i] = col + 4 * row;
        i += 1;
    }

    table
};

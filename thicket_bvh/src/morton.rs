// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 30-bit Morton codes and the radix sort that orders them.

use glam::Vec3;

/// Bits of quantization per axis.
pub(crate) const MORTON_BITS: u32 = 10;

/// Total bits in a code.
pub(crate) const MORTON_CODE_BITS: u32 = 3 * MORTON_BITS;

const MORTON_SCALE: f32 = (1 << MORTON_BITS) as f32;

/// A primitive paired with the Morton code of its normalized centroid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct MortonPrimitive {
    pub(crate) index: usize,
    pub(crate) code: u32,
}

/// Spread the low 10 bits of `x` so that two zero bits separate each of them.
#[inline]
pub(crate) fn left_shift3(mut x: u32) -> u32 {
    debug_assert!(x <= 1 << MORTON_BITS, "coordinate {x} exceeds 10 bits");
    if x == 1 << MORTON_BITS {
        x -= 1;
    }
    x = (x | (x << 16)) & 0b0000_0011_0000_0000_0000_0000_1111_1111;
    x = (x | (x << 8)) & 0b0000_0011_0000_0000_1111_0000_0000_1111;
    x = (x | (x << 4)) & 0b0000_0011_0000_1100_0011_0000_1100_0011;
    x = (x | (x << 2)) & 0b0000_1001_0010_0100_1001_0010_0100_1001;
    x
}

/// Morton code of a point whose coordinates lie in `[0, 1]`.
///
/// Bit `3k` of the result comes from x, `3k + 1` from y and `3k + 2` from z, so
/// bit `b` always splits along axis `b % 3`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "inputs are clamped to [0, 1024] before the cast"
)]
pub(crate) fn encode_morton3(normalized: Vec3) -> u32 {
    let q = (normalized * MORTON_SCALE).clamp(Vec3::ZERO, Vec3::splat(MORTON_SCALE));
    (left_shift3(q.z as u32) << 2) | (left_shift3(q.y as u32) << 1) | left_shift3(q.x as u32)
}

/// Stable LSD radix sort by code, 6 bits per pass.
pub(crate) fn radix_sort(v: &mut Vec<MortonPrimitive>) {
    const BITS_PER_PASS: u32 = 6;
    const BUCKETS: usize = 1 << BITS_PER_PASS;
    const PASSES: u32 = MORTON_CODE_BITS / BITS_PER_PASS;
    const _: () = assert!(
        MORTON_CODE_BITS % BITS_PER_PASS == 0,
        "radix digit width must divide the code width"
    );
    let mask = (1_u32 << BITS_PER_PASS) - 1;

    let mut temp = vec![MortonPrimitive::default(); v.len()];
    for pass in 0..PASSES {
        let low_bit = pass * BITS_PER_PASS;
        let (input, output) = if pass % 2 == 0 {
            (v.as_slice(), &mut temp)
        } else {
            (temp.as_slice(), &mut *v)
        };

        let mut counts = [0_usize; BUCKETS];
        for mp in input {
            let bucket = ((mp.code >> low_bit) & mask) as usize;
            assert!(bucket < BUCKETS, "radix bucket {bucket} out of range");
            counts[bucket] += 1;
        }

        let mut out_index = [0_usize; BUCKETS];
        for i in 1..BUCKETS {
            out_index[i] = out_index[i - 1] + counts[i - 1];
        }

        for mp in input {
            let bucket = ((mp.code >> low_bit) & mask) as usize;
            output[out_index[bucket]] = *mp;
            out_index[bucket] += 1;
        }
    }

    if PASSES % 2 == 1 {
        core::mem::swap(v, &mut temp);
    }
}

#[inline]
fn mask64(width: usize) -> u64 {
    if width == 0 {
        0
    } else if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

#[inline]
fn mask128(width: usize) -> u128 {
    if width == 0 {
        0
    } else if width >= 128 {
        u128::MAX
    } else {
        (1u128 << width) - 1
    }
}

/// Packs `src` (each element holding up to `src_width` significant low bits) into
/// `dst` as a tightly bit-packed, least-significant-bit-first stream of `dst_width`-bit
/// words. Widths differing from 64 are handled by zero-extension (`dst_width >
/// src_width`) or truncation of the high bits (`dst_width < src_width`).
///
/// `dst` must have at least `ceil8(src.len() * dst_width)` bytes of spare room.
/// Returns the number of bytes written, including a zero-padded trailing partial byte.
///
/// # Panics
/// Panics if `dst` is too small, or if either width exceeds 64.
pub fn pack(dst: &mut [u8], dst_width: usize, src: &[u64], src_width: usize) -> usize {
    assert!(dst_width <= 64 && src_width <= 64);
    if dst_width == 0 {
        return 0;
    }
    let needed = super::ceil8(src.len() * dst_width);
    assert!(dst.len() >= needed, "pack: destination buffer too small");

    let mask_src = mask64(src_width);
    let mask_dst = mask128(dst_width);

    let mut buffer: u128 = 0;
    let mut bits: u32 = 0;
    let mut out = 0usize;
    for &v in src {
        let val = ((v & mask_src) as u128) & mask_dst;
        buffer |= val << bits;
        bits += dst_width as u32;
        while bits >= 8 {
            dst[out] = (buffer & 0xFF) as u8;
            out += 1;
            buffer >>= 8;
            bits -= 8;
        }
    }
    if bits > 0 {
        dst[out] = (buffer & 0xFF) as u8;
        out += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::unpack;

    #[test]
    fn pack_booleans() {
        // 100 values alternating false/true starting with false: `i % 2 != 0`.
        let values: Vec<u64> = (0..100u64).map(|i| (i % 2 != 0) as u64).collect();
        let mut dst = vec![0u8; super::super::ceil8(values.len())];
        let written = pack(&mut dst, 1, &values, 1);
        assert_eq!(written, 13);
        assert_eq!(&dst[..12], &[0xAAu8; 12]);
        assert_eq!(dst[12], 0x0A);
    }

    #[test]
    fn round_trip_widths() {
        for width in 1..=64usize {
            let max = if width >= 64 { u64::MAX } else { (1u64 << width) - 1 };
            let values: Vec<u64> = (0..37u64).map(|i| i & max).collect();
            let mut packed = vec![0u8; super::super::ceil8(values.len() * width)];
            pack(&mut packed, width, &values, width);
            let mut unpacked = vec![0u64; values.len()];
            unpack(&mut unpacked, width, &packed, width);
            assert_eq!(unpacked, values, "width {}", width);
        }
    }

    #[test]
    fn truncates_high_bits() {
        let values = vec![0b1111u64];
        let mut packed = vec![0u8; 1];
        pack(&mut packed, 2, &values, 4);
        let mut unpacked = vec![0u64; 1];
        unpack(&mut unpacked, 2, &packed, 2);
        assert_eq!(unpacked, vec![0b11]);
    }
}

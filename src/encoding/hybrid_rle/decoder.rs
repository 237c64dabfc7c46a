use crate::bits::ceil8;

use super::super::uleb128;
use super::HybridEncoded;

/// An iterator that, given a slice of bytes, returns successive [`HybridEncoded`] runs.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    values: &'a [u8],
    num_bits: u32,
}

impl<'a> Decoder<'a> {
    pub fn new(values: &'a [u8], num_bits: u32) -> Self {
        assert!(num_bits <= 32);
        Self { values, num_bits }
    }

    /// Returns the number of bits being used by this decoder.
    #[inline]
    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = HybridEncoded<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.values.is_empty() {
            return None;
        }
        let (indicator, consumed) = uleb128::decode(self.values);
        self.values = &self.values[consumed..];
        if indicator & 1 == 1 {
            // bit-packed run: the high bits count groups of 8 values.
            let run_length = (indicator as usize >> 1) * 8;
            let bytes = ceil8(run_length * self.num_bits as usize);
            let bytes = std::cmp::min(bytes, self.values.len());
            let compressed = &self.values[..bytes];
            self.values = &self.values[bytes..];
            Some(HybridEncoded::Bitpacked {
                compressed,
                num_bits: self.num_bits as usize,
                run_length,
            })
        } else {
            // RLE run: the repeated value follows, using ceil8(num_bits) bytes.
            let run_length = indicator as usize >> 1;
            let rle_bytes = ceil8(self.num_bits as usize);
            let mut value_bytes = [0u8; 4];
            value_bytes[..rle_bytes].copy_from_slice(&self.values[..rle_bytes]);
            let value = u32::from_le_bytes(value_bytes);
            self.values = &self.values[rle_bytes..];
            Some(HybridEncoded::Rle { value, run_length })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitpacked_run() {
        let bit_width = 1;
        let values = vec![
            2, 0, 0, 0, // length
            0b00000011, 0b00001011, // data
        ];

        let mut decoder = Decoder::new(&values[4..6], bit_width);
        let run = decoder.next().unwrap();

        if let HybridEncoded::Bitpacked {
            compressed,
            num_bits,
            run_length,
        } = run
        {
            assert_eq!(compressed, &[0b00001011]);
            assert_eq!(num_bits, 1);
            let result = super::super::super::bitpacked::Decoder::new(compressed, num_bits as u8, run_length)
                .collect::<Vec<_>>();
            assert_eq!(&result[..5], &[1, 1, 0, 1, 0]);
        } else {
            panic!("expected a bitpacked run")
        };
    }

    #[test]
    fn rle_run() {
        let bit_width = 1;
        let length = 8;
        let values = vec![
            2, 0, 0, 0, // length
            0b00010000, // data
            0b00000001,
        ];

        let mut decoder = Decoder::new(&values[4..4 + 2], bit_width);
        let run = decoder.next().unwrap();

        if let HybridEncoded::Rle { value, run_length } = run {
            assert_eq!(value, 1);
            assert_eq!(run_length, length);
        } else {
            panic!("expected an RLE run")
        };
    }
}

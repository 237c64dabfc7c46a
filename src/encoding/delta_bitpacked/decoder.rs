use crate::bits::ceil8;

use super::super::{bitpacked, uleb128, zigzag_leb128};

#[derive(Debug)]
struct Block<'a> {
    min_delta: i64,
    num_mini_blocks: usize,
    values_per_mini_block: usize,
    bitwidths: &'a [u8],
    values: &'a [u8],
    remaining: usize,
    current_index: usize,
    current_miniblock: Option<bitpacked::Decoder<'a>>,
    consumed_bytes: usize,
}

impl<'a> Block<'a> {
    fn new(
        mut values: &'a [u8],
        num_mini_blocks: usize,
        values_per_mini_block: usize,
        length: usize,
    ) -> Self {
        let length = std::cmp::min(length, num_mini_blocks * values_per_mini_block);

        let mut consumed_bytes = 0;
        let (min_delta, consumed) = zigzag_leb128::decode(values);
        consumed_bytes += consumed;
        values = &values[consumed..];

        let bitwidths = &values[..num_mini_blocks];
        consumed_bytes += num_mini_blocks;
        values = &values[num_mini_blocks..];

        let mut block = Block {
            min_delta,
            num_mini_blocks,
            values_per_mini_block,
            bitwidths,
            remaining: length,
            values,
            current_index: 0,
            current_miniblock: None,
            consumed_bytes,
        };

        block.advance_miniblock();

        block
    }

    fn advance_miniblock(&mut self) {
        let num_bits = self.bitwidths[0];
        self.bitwidths = &self.bitwidths[1..];

        self.current_miniblock = if num_bits > 0 {
            let length = std::cmp::min(self.remaining, self.values_per_mini_block);

            let miniblock_length = ceil8(self.values_per_mini_block * num_bits as usize);
            let (miniblock, remainder) = self.values.split_at(miniblock_length);

            self.values = remainder;
            self.consumed_bytes += miniblock_length;

            Some(bitpacked::Decoder::new(miniblock, num_bits, length))
        } else {
            None
        };
        self.current_index = 0;
    }
}

impl<'a> Iterator for Block<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let result = self.min_delta
            + self
                .current_miniblock
                .as_mut()
                .map(|x| x.next().unwrap())
                .unwrap_or(0) as i64;
        self.current_index += 1;
        self.remaining -= 1;

        if self.remaining > 0 && self.current_index == self.values_per_mini_block {
            self.advance_miniblock();
        }

        Some(result as u32)
    }
}

/// Decoder of `DELTA_BINARY_PACKED`. Implements `Iterator<Item = i32>`.
#[derive(Debug)]
pub struct Decoder<'a> {
    num_mini_blocks: usize,
    values_per_mini_block: usize,
    total_count: usize,
    first_value: i64,
    values: &'a [u8],
    current_block: Option<Block<'a>>,
    consumed_bytes: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(mut values: &'a [u8]) -> Self {
        let mut consumed_bytes = 0;
        let (block_size, consumed) = uleb128::decode(values);
        consumed_bytes += consumed;
        assert_eq!(block_size % 128, 0);
        values = &values[consumed..];

        let (num_mini_blocks, consumed) = uleb128::decode(values);
        let num_mini_blocks = num_mini_blocks as usize;
        consumed_bytes += consumed;
        values = &values[consumed..];

        let (total_count, consumed) = uleb128::decode(values);
        let total_count = total_count as usize;
        consumed_bytes += consumed;
        values = &values[consumed..];

        let (first_value, consumed) = zigzag_leb128::decode(values);
        consumed_bytes += consumed;
        values = &values[consumed..];

        let values_per_mini_block = block_size as usize / num_mini_blocks.max(1);
        assert_eq!(values_per_mini_block % 8, 0);

        // `total_count` includes the first value; the rest come from blocks.
        let block_count = total_count.saturating_sub(1);
        let current_block = (block_count > 0)
            .then(|| Block::new(values, num_mini_blocks, values_per_mini_block, block_count));

        Self {
            num_mini_blocks,
            values_per_mini_block,
            total_count,
            first_value,
            values,
            current_block,
            consumed_bytes,
        }
    }

    /// Returns the total number of bytes consumed up to this point.
    pub fn consumed_bytes(&self) -> usize {
        self.consumed_bytes
            + self
                .current_block
                .as_ref()
                .map_or(0, |b| b.consumed_bytes)
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.total_count == 0 {
            return None;
        }

        let result = self.first_value as i32;
        self.total_count -= 1;

        if self.total_count > 0 {
            let delta = if let Some(x) = self.current_block.as_mut().and_then(|b| b.next()) {
                x as i64
            } else {
                let consumed = self.current_block.as_ref().map_or(0, |b| b.consumed_bytes);
                self.values = &self.values[consumed..];
                self.consumed_bytes += consumed;
                let mut block = Block::new(
                    self.values,
                    self.num_mini_blocks,
                    self.values_per_mini_block,
                    self.total_count,
                );
                let delta = block.next().unwrap() as i64;
                self.current_block = Some(block);
                delta
            };
            self.first_value += delta;
        }

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.total_count, Some(self.total_count))
    }
}

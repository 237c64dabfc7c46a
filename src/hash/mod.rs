//! An open-addressed insert-or-lookup table used by dictionary encoding to assign
//! compact, insertion-order-preserving integer indexes to distinct fixed-width keys.

const DEFAULT_CAPACITY: usize = 256;
const SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Keys the probe table can hold: unsigned integers of 32, 64 or 128 bits.
pub trait ProbeKey: Copy + Eq {
    fn mix(&self, seed: u64) -> u64;
}

#[inline]
fn mix64(mut x: u64) -> u64 {
    // A splitmix64-style avalanche; not cryptographic, only needs to scatter keys
    // across slots.
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^= x >> 31;
    x
}

impl ProbeKey for u32 {
    #[inline]
    fn mix(&self, seed: u64) -> u64 {
        mix64((*self as u64) ^ seed)
    }
}

impl ProbeKey for u64 {
    #[inline]
    fn mix(&self, seed: u64) -> u64 {
        mix64(*self ^ seed)
    }
}

impl ProbeKey for u128 {
    #[inline]
    fn mix(&self, seed: u64) -> u64 {
        let lo = *self as u64;
        let hi = (*self >> 64) as u64;
        mix64(lo ^ seed).wrapping_add(mix64(hi ^ seed.rotate_left(17)))
    }
}

/// An open-addressed `key -> insertion-order index` map.
///
/// Capacity is always a power of two and grows geometrically whenever the occupancy
/// after an insert would exceed `max_load * capacity`. Probing is linear; there is no
/// deletion, so a vacant slot unambiguously means "not present".
#[derive(Debug, Clone)]
pub struct HashTable<K> {
    slots: Vec<Option<(K, i32)>>,
    len: usize,
    max_load: f64,
}

impl<K: ProbeKey> HashTable<K> {
    /// A table with the default starting capacity and a 0.9 max load factor.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A table with at least `capacity` slots (rounded up to a power of two).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_max_load(capacity, 0.9)
    }

    /// # Panics
    /// Panics if `max_load` is not in `(0, 1]`.
    pub fn with_capacity_and_max_load(capacity: usize, max_load: f64) -> Self {
        assert!(max_load > 0.0 && max_load <= 1.0, "max_load out of range");
        let capacity = capacity.max(1).next_power_of_two();
        Self {
            slots: vec![None; capacity],
            len: 0,
            max_load,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Looks up `key`, inserting it with the next insertion-order index if absent.
    /// Returns the assigned (or previously assigned) index.
    pub fn probe(&mut self, key: K) -> i32 {
        self.grow_if_needed(1);
        Self::probe_in(&mut self.slots, &mut self.len, key)
    }

    fn probe_in(slots: &mut [Option<(K, i32)>], len: &mut usize, key: K) -> i32 {
        let mask = slots.len() - 1;
        let mut slot = (key.mix(SEED) as usize) & mask;
        loop {
            match &slots[slot] {
                Some((k, idx)) if *k == key => return *idx,
                Some(_) => slot = (slot + 1) & mask,
                None => {
                    let idx = *len as i32;
                    slots[slot] = Some((key, idx));
                    *len += 1;
                    return idx;
                }
            }
        }
    }

    /// Probes every key in `keys`, writing the assigned index for each into the
    /// matching slot of `out`. `out` must be at least as long as `keys`.
    ///
    /// Hashes are pre-computed in a separate pass so the probe loop itself only
    /// touches already-mixed keys, keeping the memory-access pattern uniform.
    pub fn probe_bulk(&mut self, keys: &[K], out: &mut [i32]) {
        assert!(out.len() >= keys.len());
        self.grow_if_needed(keys.len());
        let hashes: Vec<u64> = keys.iter().map(|k| k.mix(SEED)).collect();
        let mask = self.slots.len() - 1;
        for (i, &key) in keys.iter().enumerate() {
            let mut slot = (hashes[i] as usize) & mask;
            out[i] = loop {
                match &self.slots[slot] {
                    Some((k, idx)) if *k == key => break *idx,
                    Some(_) => slot = (slot + 1) & mask,
                    None => {
                        let idx = self.len as i32;
                        self.slots[slot] = Some((key, idx));
                        self.len += 1;
                        break idx;
                    }
                }
            };
        }
    }

    /// Clears occupancy but keeps the allocated capacity for reuse.
    pub fn reset(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.len = 0;
    }

    fn grow_if_needed(&mut self, incoming: usize) {
        let projected = self.len + incoming;
        if (projected as f64) <= self.max_load * self.slots.len() as f64 {
            return;
        }
        let mut new_capacity = self.slots.len() * 2;
        while (projected as f64) > self.max_load * new_capacity as f64 {
            new_capacity *= 2;
        }
        let mut new_slots = vec![None; new_capacity];
        let mut new_len = 0usize;
        for entry in self.slots.drain(..).flatten() {
            let (key, idx) = entry;
            let mask = new_slots.len() - 1;
            let mut slot = (key.mix(SEED) as usize) & mask;
            while new_slots[slot].is_some() {
                slot = (slot + 1) & mask;
            }
            new_slots[slot] = Some((key, idx));
            new_len += 1;
        }
        self.slots = new_slots;
        self.len = new_len;
    }
}

impl<K: ProbeKey> Default for HashTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut table = HashTable::<u64>::new();
        assert_eq!(table.probe(10), 0);
        assert_eq!(table.probe(20), 1);
        assert_eq!(table.probe(10), 0);
        assert_eq!(table.probe(30), 2);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn grows_past_max_load() {
        let mut table = HashTable::<u32>::with_capacity_and_max_load(4, 0.9);
        for i in 0..100u32 {
            let idx = table.probe(i);
            assert_eq!(idx, i as i32);
        }
        assert_eq!(table.len(), 100);
        assert!(table.capacity() >= 100);
        // every key still resolves to its original index after growth
        for i in 0..100u32 {
            assert_eq!(table.probe(i), i as i32);
        }
    }

    #[test]
    fn bulk_probe_matches_sequential() {
        let mut sequential = HashTable::<u64>::new();
        let keys: Vec<u64> = vec![5, 6, 5, 7, 6, 8];
        let sequential_indexes: Vec<i32> = keys.iter().map(|&k| sequential.probe(k)).collect();

        let mut bulk = HashTable::<u64>::new();
        let mut out = vec![0i32; keys.len()];
        bulk.probe_bulk(&keys, &mut out);
        assert_eq!(out, sequential_indexes);
    }

    #[test]
    fn reset_clears_but_keeps_capacity() {
        let mut table = HashTable::<u128>::new();
        table.probe(1);
        table.probe(2);
        let cap = table.capacity();
        table.reset();
        assert_eq!(table.len(), 0);
        assert_eq!(table.capacity(), cap);
        assert_eq!(table.probe(1), 0);
    }
}

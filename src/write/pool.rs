use std::collections::HashMap;
use std::sync::Mutex;

/// An allocator for page body buffers, shared across column writers (spec.md §6.3
/// `page_buffer_pool`). Implementations must be safe for concurrent `get`/`put` from
/// writer instances running on distinct threads.
pub trait PagePool: Send + Sync {
    fn get(&self, size: usize) -> Vec<u8>;
    fn put(&self, buffer: Vec<u8>);
}

/// A size-classed free list: buffers are bucketed by their capacity's next power of
/// two, so a `get` for a similarly-sized request can reuse a buffer from a prior
/// `put` without an exact-size match.
#[derive(Default)]
pub struct FreeListPool {
    classes: Mutex<HashMap<usize, Vec<Vec<u8>>>>,
}

impl FreeListPool {
    pub fn new() -> Self {
        Self::default()
    }

    fn class_of(size: usize) -> usize {
        size.next_power_of_two().max(1)
    }
}

impl PagePool for FreeListPool {
    fn get(&self, size: usize) -> Vec<u8> {
        let class = Self::class_of(size);
        let mut classes = self.classes.lock().unwrap();
        if let Some(buffer) = classes.get_mut(&class).and_then(|bucket| bucket.pop()) {
            buffer
        } else {
            Vec::with_capacity(class)
        }
    }

    fn put(&self, mut buffer: Vec<u8>) {
        buffer.clear();
        let class = Self::class_of(buffer.capacity());
        let mut classes = self.classes.lock().unwrap();
        classes.entry(class).or_default().push(buffer);
    }
}

use crate::{CoreError, CoreResult, Sample};

use std::panic::Location;

use error_location::ErrorLocation;

/// Fixed-capacity circular store of the most recent samples.
///
/// Slots are filled lazily, so a buffer that has not wrapped yet never holds
/// placeholder entries.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    slots: Vec<Sample>,
    capacity: usize,
    /// Next slot to overwrite once the buffer is full
    head: usize,
}

impl RingBuffer {
    #[track_caller]
    pub fn new(capacity: usize) -> CoreResult<Self> {
        if capacity == 0 {
            return Err(CoreError::InvalidCapacity {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        })
    }

    /// Store a sample, overwriting the oldest one when full. O(1).
    pub fn append(&mut self, sample: Sample) {
        if self.slots.len() < self.capacity {
            self.slots.push(sample);
        } else {
            self.slots[self.head] = sample;
        }
        self.head = (self.head + 1) % self.capacity;
    }

    /// Copy of the held samples, oldest first.
    pub fn snapshot(&self) -> Vec<Sample> {
        if self.slots.len() < self.capacity {
            return self.slots.clone();
        }

        let mut out = Vec::with_capacity(self.capacity);
        out.extend_from_slice(&self.slots[self.head..]);
        out.extend_from_slice(&self.slots[..self.head]);
        out
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

//! Fixed-capacity circular store backing a media playlist's segments.

use std::iter::FusedIterator;

use crate::{Error, Result, format::MediaSegment};

/// Slots are allocated once; the live range is `count` slots starting at
/// `head`, wrapping around the end of the backing store.
#[derive(Clone, Debug)]
pub(crate) struct SegmentRing {
    slots: Vec<Option<MediaSegment>>,
    head: usize,
    count: usize,
    /// Sequence number of the oldest live segment.
    seq_no: u64,
    /// SeqId for the next push, `None` once `u64::MAX` has been handed out.
    next_seq_id: Option<u64>,
}

impl SegmentRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            head: 0,
            count: 0,
            seq_no: 0,
            next_seq_id: Some(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    pub fn seq_no(&self) -> u64 {
        self.seq_no
    }

    /// SeqIds of live segments are kept; an empty ring continues from here.
    pub fn set_seq_no(&mut self, seq_no: u64) {
        self.seq_no = seq_no;
        if self.count == 0 {
            self.next_seq_id = Some(seq_no);
        }
    }

    fn slot(&self, offset: usize) -> usize {
        (self.head + offset) % self.slots.len()
    }

    /// Stores a segment after the newest one, assigning its SeqId.
    pub fn push(&mut self, mut segment: MediaSegment) -> Result<&mut MediaSegment> {
        if self.is_full() {
            return Err(Error::PlaylistFull);
        }

        segment.seq_id = self
            .next_seq_id
            .ok_or(Error::InvalidState("media sequence number overflow"))?;
        self.next_seq_id = segment.seq_id.checked_add(1);

        let index = self.slot(self.count);
        self.count += 1;
        Ok(self.slots[index].insert(segment))
    }

    /// Like [`push`](Self::push), but evicts the oldest segment when full.
    pub fn slide(&mut self, segment: MediaSegment) -> Result<&mut MediaSegment> {
        if self.slots.is_empty() {
            return Err(Error::PlaylistFull);
        }
        if self.next_seq_id.is_none() {
            return Err(Error::InvalidState("media sequence number overflow"));
        }
        if self.is_full() {
            self.pop_front();
        }
        self.push(segment)
    }

    pub fn pop_front(&mut self) -> Option<MediaSegment> {
        if self.count == 0 {
            return None;
        }

        let segment = self.slots[self.head].take();
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        // an empty ring past the last representable id reports u64::MAX
        self.seq_no = self.seq_no.saturating_add(1);
        segment
    }

    /// Doubles the storage, unwrapping the live range to the front.
    pub fn grow(&mut self) {
        let capacity = (self.slots.len() * 2).max(1);
        let mut slots = Vec::with_capacity(capacity);
        for offset in 0..self.count {
            let index = self.slot(offset);
            slots.push(self.slots[index].take());
        }
        slots.resize(capacity, None);

        self.slots = slots;
        self.head = 0;
    }

    /// Segment at `offset` from the oldest live one.
    pub fn get(&self, offset: usize) -> Option<&MediaSegment> {
        if offset >= self.count {
            return None;
        }
        self.slots[self.slot(offset)].as_ref()
    }

    pub fn get_mut(&mut self, offset: usize) -> Option<&mut MediaSegment> {
        if offset >= self.count {
            return None;
        }
        let index = self.slot(offset);
        self.slots[index].as_mut()
    }

    pub fn last(&self) -> Option<&MediaSegment> {
        self.count.checked_sub(1).and_then(|x| self.get(x))
    }

    pub fn last_mut(&mut self) -> Option<&mut MediaSegment> {
        match self.count.checked_sub(1) {
            Some(x) => self.get_mut(x),
            None => None,
        }
    }

    pub fn iter(&self) -> Segments<'_> {
        Segments {
            ring: self,
            front: 0,
            back: self.count,
        }
    }
}

/// Oldest-to-newest traversal of the live segments.
#[derive(Clone)]
pub struct Segments<'a> {
    ring: &'a SegmentRing,
    front: usize,
    back: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a MediaSegment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let segment = self.ring.get(self.front);
        self.front += 1;
        segment
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Segments<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.ring.get(self.back)
    }
}

impl ExactSizeIterator for Segments<'_> {}

impl FusedIterator for Segments<'_> {}

//! Per-core stack arena
//!
//! Bump allocator over a fixed byte region. Job stacks are carved from it once at
//! boot, before the scheduler starts, and are never returned.

use core::fmt;

/// Alignment of every allocation boundary in bytes
pub const ARENA_ALIGN: usize = 8;

/// Arena allocation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArenaError {
    /// Aligned request does not fit in the remaining space
    OutOfSpace { requested: usize, remaining: usize },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArenaError::OutOfSpace {
                requested,
                remaining,
            } => write!(
                f,
                "Stack arena exhausted: requested {} bytes, {} remaining",
                requested, remaining
            ),
        }
    }
}

/// Round `value` up to the next multiple of [`ARENA_ALIGN`]
///
/// Returns `None` on overflow.
pub const fn align_up(value: usize) -> Option<usize> {
    match value.checked_add(ARENA_ALIGN - 1) {
        Some(v) => Some(v & !(ARENA_ALIGN - 1)),
        None => None,
    }
}

/// Bump allocator over an exclusively borrowed region
///
/// Invariants: `offset` never decreases between resets, is a multiple of
/// [`ARENA_ALIGN`] after every allocation, and never exceeds the region size.
pub struct StackArena<'a> {
    region: &'a mut [u8],
    offset: usize,
}

impl<'a> StackArena<'a> {
    /// Wrap `region`; the arena starts empty
    pub fn new(region: &'a mut [u8]) -> Self {
        Self { region, offset: 0 }
    }

    /// Carve `size` bytes from the free offset
    ///
    /// The offset then moves to the next 8-byte boundary past the allocation.
    /// On failure the arena is left untouched.
    pub fn allocate(&mut self, size: usize) -> Result<&mut [u8], ArenaError> {
        let start = self.offset;
        let end = start
            .checked_add(size)
            .and_then(align_up)
            .filter(|end| *end <= self.region.len())
            .ok_or(ArenaError::OutOfSpace {
                requested: size,
                remaining: self.remaining(),
            })?;

        self.offset = end;
        Ok(&mut self.region[start..start + size])
    }

    /// Zero the whole region and rewind to the start
    pub fn reset(&mut self) {
        self.region.fill(0);
        self.offset = 0;
    }

    /// Bytes consumed so far, alignment padding included
    pub fn used(&self) -> usize {
        self.offset
    }

    /// Total region size
    pub fn capacity(&self) -> usize {
        self.region.len()
    }

    /// Bytes still available
    pub fn remaining(&self) -> usize {
        self.region.len() - self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0), Some(0));
        assert_eq!(align_up(1), Some(8));
        assert_eq!(align_up(8), Some(8));
        assert_eq!(align_up(13), Some(16));
        assert_eq!(align_up(usize::MAX), None);
    }

    #[test]
    fn test_allocations_stay_aligned() {
        let mut region = [0u8; 256];
        let mut arena = StackArena::new(&mut region);

        assert_eq!(arena.allocate(13).unwrap().len(), 13);
        assert_eq!(arena.used(), 16);

        assert_eq!(arena.allocate(128).unwrap().len(), 128);
        assert_eq!(arena.used(), 144);

        assert_eq!(arena.allocate(0).unwrap().len(), 0);
        assert_eq!(arena.used(), 144);
        assert_eq!(arena.remaining(), 112);
    }

    #[test]
    fn test_allocations_do_not_overlap() {
        let mut region = [0u8; 64];
        let base = region.as_ptr() as usize;
        let mut arena = StackArena::new(&mut region);

        let first = arena.allocate(10).unwrap().as_ptr() as usize - base;
        let second = arena.allocate(10).unwrap().as_ptr() as usize - base;
        assert_eq!(first, 0);
        assert_eq!(second, 16);
    }

    #[test]
    fn test_over_capacity_fails_without_mutation() {
        let mut region = [0u8; 64];
        let mut arena = StackArena::new(&mut region);
        arena.allocate(40).unwrap();

        // 40 + 25 aligns to 72, past the region
        let err = arena.allocate(25).unwrap_err();
        assert_eq!(
            err,
            ArenaError::OutOfSpace {
                requested: 25,
                remaining: 24
            }
        );
        assert_eq!(arena.used(), 40);

        // The exact remainder still fits
        assert!(arena.allocate(24).is_ok());
        assert_eq!(arena.used(), 64);
        assert!(arena.allocate(1).is_err());
    }

    #[test]
    fn test_every_request_size_keeps_invariants() {
        const SIZE: usize = 64;
        for first in 0..=SIZE {
            for size in 0..=SIZE {
                let mut region = [0u8; SIZE];
                let mut arena = StackArena::new(&mut region);
                let _ = arena.allocate(first);
                let before = arena.used();
                let fits = align_up(before + size).map_or(false, |end| end <= SIZE);

                match arena.allocate(size) {
                    Ok(stack) => {
                        assert!(fits, "first={} size={}", first, size);
                        assert_eq!(stack.len(), size);
                    }
                    Err(e) => {
                        assert!(!fits, "first={} size={}", first, size);
                        assert_eq!(
                            e,
                            ArenaError::OutOfSpace {
                                requested: size,
                                remaining: SIZE - before
                            }
                        );
                        assert_eq!(arena.used(), before);
                    }
                }

                let after = arena.used();
                assert!(after >= before);
                assert_eq!(after % ARENA_ALIGN, 0);
                assert!(after <= arena.capacity());
            }
        }
    }

    #[test]
    fn test_padding_counts_against_capacity() {
        // 60 bytes fit, but the aligned end (64) does not in a 62 byte region
        let mut region = [0u8; 62];
        let mut arena = StackArena::new(&mut region);
        assert!(arena.allocate(60).is_err());
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn test_cumulative_spans_never_exceed_capacity() {
        let mut region = [0u8; 1000];
        let mut arena = StackArena::new(&mut region);
        let mut total = 0;
        for size in [1usize, 7, 9, 100, 333, 64, 255, 17, 500] {
            if let Ok(stack) = arena.allocate(size) {
                total += stack.len();
            }
            assert!(arena.used() <= arena.capacity());
            assert_eq!(arena.used() % ARENA_ALIGN, 0);
        }
        assert!(total <= arena.capacity());
    }

    #[test]
    fn test_reset_zeroes_and_rewinds() {
        let mut region = [0u8; 32];
        let mut arena = StackArena::new(&mut region);
        arena.allocate(16).unwrap().fill(0xAA);
        arena.reset();
        assert_eq!(arena.used(), 0);
        assert!(arena.allocate(32).unwrap().iter().all(|b| *b == 0));
    }
}

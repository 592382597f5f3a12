use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::Rectangle;

/// Checked reference to a pooled rectangle. The generation is a pool-wide
/// monotonic counter stamped at acquisition, so staleness is detected by
/// identity comparison rather than by rectangle value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectHandle {
    index: u32,
    generation: u64,
}

impl RectHandle {
    pub fn index(self) -> u32 {
        self.index
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    rect: Rectangle,
    // 0 marks a released slot; live generations start at 1.
    generation: u64,
}

/// Recycles rectangle instances so steady-state ticks do not allocate.
/// Every acquisition hands out a fresh generation; release must happen
/// exactly once per acquisition, and misuse fails fast instead of silently
/// corrupting pooled state.
#[derive(Debug)]
pub struct RectPool {
    slots: Vec<Slot>,
    free: Vec<u32>,
    next_generation: u64,
    unreleased: usize,
}

impl RectPool {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            next_generation: 1,
            unreleased: 0,
        }
    }

    pub fn acquire(&mut self) -> RectHandle {
        self.acquire_from(&Rectangle::default())
    }

    pub fn acquire_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> RectHandle {
        self.acquire_from(&Rectangle::new(x, y, width, height))
    }

    pub fn acquire_from(&mut self, source: &Rectangle) -> RectHandle {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.unreleased += 1;

        let index = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.rect = *source;
                slot.generation = generation;
                index
            }
            None => {
                self.slots.push(Slot {
                    rect: *source,
                    generation,
                });
                (self.slots.len() - 1) as u32
            }
        };

        RectHandle { index, generation }
    }

    pub fn get(&self, handle: RectHandle) -> QuadtreeResult<&Rectangle> {
        let slot = self.slot(handle)?;
        Ok(&slot.rect)
    }

    pub fn release(&mut self, handle: RectHandle) -> QuadtreeResult<()> {
        self.slot(handle)?;
        let slot = &mut self.slots[handle.index as usize];
        slot.generation = 0;
        self.free.push(handle.index);
        self.unreleased -= 1;
        Ok(())
    }

    /// Rectangles currently handed out and not yet released.
    pub fn live(&self) -> usize {
        self.unreleased
    }

    /// Released slots waiting for reuse.
    pub fn pooled(&self) -> usize {
        self.free.len()
    }

    fn slot(&self, handle: RectHandle) -> QuadtreeResult<&Slot> {
        let slot = self.slots.get(handle.index as usize).ok_or(
            QuadtreeError::RectHandleOutOfRange {
                index: handle.index,
                len: self.slots.len(),
            },
        )?;
        if slot.generation != handle.generation {
            return Err(QuadtreeError::StaleRectHandle {
                index: handle.index,
                expected: handle.generation,
                found: slot.generation,
            });
        }
        Ok(slot)
    }
}

impl Default for RectPool {
    fn default() -> Self {
        Self::new()
    }
}

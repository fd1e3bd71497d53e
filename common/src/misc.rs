
use crate::{Pointer, Port};

pub trait IsEven: Copy {
    #[allow(clippy::wrong_self_convention)]
    fn is_even(self) -> bool;

    #[allow(clippy::wrong_self_convention)]
    fn is_odd(self) -> bool {
        !self.is_even()
    }
}

impl IsEven for u16 {
    fn is_even(self) -> bool {
        self & 0x1 != 1
    }
}

////////////////////////////////////////////////////////////////////////////////

// Inclusive window of addresses or ports claimed by a peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<T> {
    pub start: T,
    pub end: T,
}

impl<T: PartialOrd + Copy> Window<T> {
    pub fn new(start: T, end: T) -> Self {
        assert!(start <= end, "Window end before start");
        Window { start, end }
    }

    pub fn contains(&self, val: T) -> bool {
        self.start <= val && val <= self.end
    }

    pub fn overlaps(&self, other: &Window<T>) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

pub type MemWindow = Window<Pointer>;
pub type IoWindow = Window<Port>;

impl MemWindow {
    pub fn size(&self) -> u32 {
        self.end - self.start + 1
    }
}

impl IoWindow {
    pub fn size(&self) -> u32 {
        (self.end - self.start) as u32 + 1
    }

    pub fn ports(&self) -> impl Iterator<Item = Port> {
        self.start..=self.end
    }
}

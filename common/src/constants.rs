
use crate::{Pointer, Port};

pub const MEM_END: Pointer = 0x10_0000; // Exclusive

// Value seen on the data bus when nothing drives it.
pub const OPEN_BUS: u8 = 0xff;

// Monochrome display adapter.
pub const MDA_MEM_START: Pointer = 0xb0000;
pub const MDA_MEM_END: Pointer = 0xb7fff; // Inclusive
pub const MDA_IO_START: Port = 0x3b0;
pub const MDA_IO_END: Port = 0x3bf; // Inclusive

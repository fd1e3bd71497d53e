pub mod constants;
pub mod misc;

// Physical address on the host bus (20 bits are decoded).
pub type Pointer = u32;

// I/O port number.
pub type Port = u16;

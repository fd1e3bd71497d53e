use bytemuck::cast_slice;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const MEM_SIZE: usize = 0x1000;
pub const NUM_CELLS: usize = MEM_SIZE / 2;
pub const NUM_CRT_REGS: usize = 0x100;

// Only the low 11 bits of the cursor offset select a cell.
pub const CURSOR_MASK: u16 = 0x7ff;

pub struct VideoState {
    pub(crate) mem: [u8; MEM_SIZE],
    pub(crate) dirty_cell: [bool; NUM_CELLS],
    pub(crate) is_dirty: bool,

    pub(crate) cursor_visible: bool,
    pub(crate) cursor_offset: u16,

    pub(crate) refresh: u8,
    pub(crate) mode_ctrl: u8,
    pub(crate) crt_addr: u8,
    pub(crate) crt_regs: [u8; NUM_CRT_REGS],
}

impl VideoState {
    // Video memory comes up holding garbage, like the real thing.
    pub fn randomized(seed: u64) -> Self {
        let mut mem = [0u8; MEM_SIZE];
        StdRng::seed_from_u64(seed).fill(&mut mem[..]);

        VideoState {
            mem,
            dirty_cell: [false; NUM_CELLS],
            is_dirty: false,
            cursor_visible: false,
            cursor_offset: 0,
            refresh: 0,
            mode_ctrl: 0,
            crt_addr: 0,
            crt_regs: [0; NUM_CRT_REGS],
        }
    }

    pub(crate) fn reset(&mut self) {
        self.cursor_visible = true;
        self.cursor_offset = 0;
        self.is_dirty = true;
        self.dirty_cell = [true; NUM_CELLS];
    }

    pub(crate) fn mark_cursor_dirty(&mut self, offset: u16) {
        self.dirty_cell[(offset & CURSOR_MASK) as usize] = true;
    }

    pub fn mem(&self) -> &[u8] {
        &self.mem
    }

    // (character, attribute) pairs.
    pub fn cells(&self) -> &[[u8; 2]] {
        cast_slice(&self.mem)
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn is_cell_dirty(&self, cell: usize) -> bool {
        self.dirty_cell[cell]
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn cursor_offset(&self) -> u16 {
        self.cursor_offset
    }

    pub fn mode_ctrl(&self) -> u8 {
        self.mode_ctrl
    }

    pub fn crt_addr(&self) -> u8 {
        self.crt_addr
    }

    pub fn crt_reg(&self, idx: u8) -> u8 {
        self.crt_regs[idx as usize]
    }
}

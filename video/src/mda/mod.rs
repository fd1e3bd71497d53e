mod attrib;
mod state;

pub use attrib::{decode, Attrib, BLINK_ENABLE};
pub use state::{VideoState, CURSOR_MASK, MEM_SIZE, NUM_CELLS, NUM_CRT_REGS};

use common::constants::{MDA_IO_END, MDA_IO_START, MDA_MEM_END, MDA_MEM_START};
use common::misc::IsEven;
use common::{Pointer, Port};
use crate::peripheral::{DeviceClass, Installer, Peripheral};

use log::{debug, trace};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

pub const COLUMNS: usize = 80;
pub const ROWS: usize = 25;

// CRT controller registers this adapter gives side effects to. The rest of
// the register file is plain storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum CrtReg {
    CursorStart = 0x0a,
    CursorAddrHigh = 0x0e,
    CursorAddrLow = 0x0f,
}

pub struct MdaVideo {
    state: VideoState,
}

impl Default for MdaVideo {
    fn default() -> Self {
        MdaVideo::new()
    }
}

impl MdaVideo {
    pub const NAME: &'static str = "MDA Compatible Video Adapter";

    // Any even port other than these selects the CRT register, and any odd
    // port is the CRT data register.
    pub const CRT_ADDR: Port = 0x3b4;
    pub const CRT_DATA: Port = 0x3b5;
    pub const MODE_CTRL: Port = 0x3b8;
    pub const STATUS: Port = 0x3ba;

    pub const DEFAULT_SEED: u64 = 0x4d44_4120;

    const REFRESH_TOGGLE: u8 = 0x9;
    const CURSOR_VISIBLE: u8 = 0x20;

    pub fn new() -> Self {
        Self::with_seed(Self::DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        MdaVideo {
            state: VideoState::randomized(seed),
        }
    }

    pub fn state(&self) -> &VideoState {
        &self.state
    }

    // Force the next traversal to deliver every cell.
    pub fn invalidate(&mut self) {
        self.state.is_dirty = true;
    }

    fn mem_index(addr: Pointer) -> usize {
        addr.wrapping_sub(MDA_MEM_START) as usize & (MEM_SIZE - 1)
    }

    // Both the cell the cursor leaves and the one it lands on need a redraw.
    fn move_cursor(&mut self, old: u16, new: u16) {
        self.state.mark_cursor_dirty(old);
        self.state.cursor_offset = new;
        self.state.mark_cursor_dirty(new);
    }

    fn crt_write(&mut self, val: u8) {
        let addr = self.state.crt_addr;
        self.state.crt_regs[addr as usize] = val;

        let old = self.state.cursor_offset;
        match CrtReg::from_u8(addr) {
            Some(CrtReg::CursorStart) => {
                self.state.cursor_visible = val & Self::CURSOR_VISIBLE != 0;
                self.state.mark_cursor_dirty(old);
            }
            Some(CrtReg::CursorAddrHigh) => {
                self.move_cursor(old, (old & 0x00ff) | ((val as u16) << 8));
            }
            Some(CrtReg::CursorAddrLow) => {
                self.move_cursor(old, (old & 0xff00) | val as u16);
            }
            None => (),
        }
    }

    /// Hand every dirty cell to `f`, in cell order, then mark it clean.
    ///
    /// `f` receives the cell index, the character to draw, its decoded
    /// attributes and the cursor cell (`None` while the cursor is hidden). An
    /// error from `f` stops the pass and is returned as is; the cell it was
    /// given stays dirty and is delivered again next time.
    pub fn traverse<E, F>(&mut self, mut f: F) -> Result<(), E>
    where
        F: FnMut(usize, u8, Attrib, Option<usize>) -> Result<(), E>,
    {
        let cursor = self
            .state
            .cursor_visible
            .then(|| (self.state.cursor_offset & CURSOR_MASK) as usize);

        for cell in 0..NUM_CELLS {
            if !self.state.is_dirty && !self.state.dirty_cell[cell] {
                continue;
            }

            let [ch, attr] = self.state.cells()[cell];
            let (ch, attrib) = decode(ch, attr, self.state.mode_ctrl);
            f(cell, ch, attrib, cursor)?;

            self.state.dirty_cell[cell] = false;
        }

        self.state.is_dirty = false;
        Ok(())
    }
}

impl Peripheral for MdaVideo {
    fn install(&mut self, installer: &mut Installer) {
        installer.install_mem(MDA_MEM_START, MDA_MEM_END);
        installer.install_io(MDA_IO_START, MDA_IO_END);
    }

    fn reset(&mut self) {
        debug!("MDA: reset");
        self.state.reset();
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn class(&self) -> DeviceClass {
        DeviceClass::Video
    }

    fn read(&mut self, addr: Pointer) -> u8 {
        self.state.mem[Self::mem_index(addr)]
    }

    fn write(&mut self, addr: Pointer, val: u8) {
        let idx = Self::mem_index(addr);
        self.state.mem[idx] = val;
        self.state.dirty_cell[idx / 2] = true;
    }

    fn io_in(&mut self, port: Port) -> u8 {
        if port == Self::STATUS {
            self.state.refresh ^= Self::REFRESH_TOGGLE;
            self.state.refresh
        } else if port.is_odd() {
            self.state.crt_regs[self.state.crt_addr as usize]
        } else {
            0
        }
    }

    fn io_out(&mut self, port: Port, val: u8) {
        trace!("MDA: out 0x{val:02x} to 0x{port:x}");
        self.state.is_dirty = true;

        if port == Self::MODE_CTRL {
            self.state.mode_ctrl = val;
        } else if port.is_odd() {
            self.crt_write(val);
        } else {
            self.state.crt_addr = val;
        }
    }
}

use common::constants::{MEM_END, OPEN_BUS};
use common::misc::{IoWindow, MemWindow};
use common::{Pointer, Port};

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Generic,
    Video,
}

// Collects the memory and port windows a peripheral claims during install.
#[derive(Debug, Default)]
pub struct Installer {
    mem: Vec<MemWindow>,
    io: Vec<IoWindow>,
}

impl Installer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install_mem(&mut self, start: Pointer, end: Pointer) {
        assert!(end < MEM_END, "Memory window 0x{start:x}-0x{end:x} past end of address space");
        self.mem.push(MemWindow::new(start, end));
    }

    pub fn install_io(&mut self, start: Port, end: Port) {
        self.io.push(IoWindow::new(start, end));
    }

    pub fn mem_windows(&self) -> &[MemWindow] {
        &self.mem
    }

    pub fn io_windows(&self) -> &[IoWindow] {
        &self.io
    }
}

pub trait Peripheral: Send {
    fn install(&mut self, installer: &mut Installer);
    fn reset(&mut self) {}

    fn name(&self) -> &'static str;
    fn class(&self) -> DeviceClass {
        DeviceClass::Generic
    }

    fn read(&mut self, _addr: Pointer) -> u8 {
        OPEN_BUS
    }
    fn write(&mut self, _addr: Pointer, _val: u8) {}

    fn io_in(&mut self, _port: Port) -> u8 {
        OPEN_BUS
    }
    fn io_out(&mut self, _port: Port, _val: u8) {}
}

// The host serializes every access to a peripheral through this lock.
pub type PeripheralHandle = Arc<Mutex<dyn Peripheral>>;

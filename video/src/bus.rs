use common::constants::OPEN_BUS;
use common::misc::MemWindow;
use common::{Pointer, Port};
use crate::peripheral::{DeviceClass, Installer, PeripheralHandle};

use std::collections::HashMap;

use log::{debug, trace};

// Routes memory and port accesses to the peripheral that installed the window.
pub struct Bus {
    devices: Vec<PeripheralHandle>,
    mem_map: Vec<(MemWindow, usize)>,
    io_map: HashMap<Port, usize>,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    pub fn new() -> Bus {
        Bus {
            devices: Vec::new(),
            mem_map: Vec::new(),
            io_map: HashMap::new(),
        }
    }

    pub fn attach(&mut self, dev: PeripheralHandle) {
        let mut installer = Installer::new();
        let name = {
            let mut dev = dev.lock().unwrap();
            dev.install(&mut installer);
            dev.name()
        };

        // Check every window before claiming any, so a rejected device leaves
        // the map untouched.
        let mem = installer.mem_windows();
        for (i, win) in mem.iter().enumerate() {
            let mut taken = self.mem_map.iter().map(|(w, _)| w).chain(&mem[..i]);
            if let Some(prev) = taken.find(|w| w.overlaps(win)) {
                panic!(
                    "{name}: memory window 0x{:x}-0x{:x} overlaps 0x{:x}-0x{:x}",
                    win.start, win.end, prev.start, prev.end,
                );
            }
        }

        let mut ports = Vec::new();
        for win in installer.io_windows() {
            for port in win.ports() {
                assert!(
                    !self.io_map.contains_key(&port) && !ports.contains(&port),
                    "Duplicate peripheral for port 0x{port:x}",
                );
                ports.push(port);
            }
        }

        let idx = self.devices.len();
        for win in mem {
            debug!("Bus: {name} at 0x{:x}-0x{:x}", win.start, win.end);
            self.mem_map.push((*win, idx));
        }
        for win in installer.io_windows() {
            debug!("Bus: {name} at ports 0x{:x}-0x{:x}", win.start, win.end);
        }
        self.io_map.extend(ports.into_iter().map(|port| (port, idx)));

        self.devices.push(dev);
    }

    pub fn reset(&mut self) {
        for dev in self.devices.iter() {
            dev.lock().unwrap().reset();
        }
    }

    pub fn devices(&self) -> impl Iterator<Item = (&'static str, DeviceClass)> + '_ {
        self.devices.iter().map(|dev| {
            let dev = dev.lock().unwrap();
            (dev.name(), dev.class())
        })
    }

    fn mem_owner(&self, addr: Pointer) -> Option<&PeripheralHandle> {
        self.mem_map
            .iter()
            .find(|(win, _)| win.contains(addr))
            .map(|(_, idx)| &self.devices[*idx])
    }

    fn io_owner(&self, port: Port) -> Option<&PeripheralHandle> {
        self.io_map.get(&port).map(|idx| &self.devices[*idx])
    }


    ///////////////////////////////////////////////////////////////////////////


    pub fn mem_read(&self, addr: Pointer) -> u8 {
        if let Some(dev) = self.mem_owner(addr) {
            return dev.lock().unwrap().read(addr);
        }
        trace!("Bus: read of unmapped 0x{addr:x}");
        OPEN_BUS
    }

    pub fn mem_write(&self, addr: Pointer, val: u8) {
        if let Some(dev) = self.mem_owner(addr) {
            dev.lock().unwrap().write(addr, val);
            return;
        }
        trace!("Bus: write of 0x{val:02x} to unmapped 0x{addr:x}");
    }

    pub fn io_in(&self, port: Port) -> u8 {
        if let Some(dev) = self.io_owner(port) {
            return dev.lock().unwrap().io_in(port);
        }
        trace!("Bus: in from unmapped port 0x{port:x}");
        OPEN_BUS
    }

    pub fn io_out(&self, port: Port, val: u8) {
        if let Some(dev) = self.io_owner(port) {
            dev.lock().unwrap().io_out(port, val);
            return;
        }
        trace!("Bus: out of 0x{val:02x} to unmapped port 0x{port:x}");
    }
}

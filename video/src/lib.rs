pub mod bus;
pub mod mda;
pub mod module;
pub mod peripheral;

pub use bus::Bus;
pub use mda::{Attrib, MdaVideo};
pub use peripheral::{DeviceClass, Installer, Peripheral, PeripheralHandle};

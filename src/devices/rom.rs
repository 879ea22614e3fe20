//! ROM device.

use std::any::Any;

use super::Device;

/// Read-only storage; writes are ignored.
///
/// A ROM smaller than the range it is mapped over is rejected by
/// [`MappedMemory`](crate::MappedMemory); map it once per mirror instead.
pub struct RomDevice {
    data: Vec<u8>,
}

impl RomDevice {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl Device for RomDevice {
    fn read(&self, offset: u16) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0)
    }

    fn write(&mut self, _offset: u16, _value: u8) {}

    fn size(&self) -> usize {
        self.data.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

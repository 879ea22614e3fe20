//! RAM device.

use std::any::Any;

use super::Device;

/// Readable and writable storage.
///
/// ```
/// use cpu6502::{Device, RamDevice};
///
/// let mut ram = RamDevice::new(0x800);
/// ram.load_bytes(0x10, &[0xA9, 0x42]);
/// assert_eq!(ram.read(0x11), 0x42);
/// ```
pub struct RamDevice {
    data: Vec<u8>,
}

impl RamDevice {
    /// Zero-filled RAM of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Copies `bytes` in at `offset`; bytes past the end are discarded.
    pub fn load_bytes(&mut self, offset: usize, bytes: &[u8]) {
        if let Some(window) = self.data.get_mut(offset..) {
            let count = window.len().min(bytes.len());
            window[..count].copy_from_slice(&bytes[..count]);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Device for RamDevice {
    fn read(&self, offset: u16) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0)
    }

    fn write(&mut self, offset: u16, value: u8) {
        if let Some(byte) = self.data.get_mut(offset as usize) {
            *byte = value;
        }
    }

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ram_read_write() {
        let mut ram = RamDevice::new(256);
        assert_eq!(ram.size(), 256);

        ram.write(0, 0xAA);
        ram.write(255, 0xCC);
        assert_eq!(ram.read(0), 0xAA);
        assert_eq!(ram.read(255), 0xCC);
        assert_eq!(ram.read(1), 0x00);
    }

    #[test]
    fn test_out_of_range_access_is_harmless() {
        let mut ram = RamDevice::new(4);
        ram.write(10, 0xFF);
        assert_eq!(ram.read(10), 0x00);
    }

    #[test]
    fn test_load_bytes_truncates() {
        let mut ram = RamDevice::new(4);
        ram.load_bytes(2, &[1, 2, 3, 4]);
        assert_eq!(ram.as_slice(), &[0, 0, 1, 2]);
        ram.load_bytes(9, &[1]);
        assert_eq!(ram.as_slice(), &[0, 0, 1, 2]);
    }
}

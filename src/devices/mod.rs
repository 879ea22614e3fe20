//! Range-mapped memory bus.
//!
//! [`MappedMemory`] keeps two ordered lists, one consulted for reads and one
//! for writes. Each entry covers an inclusive address range and routes the
//! access to one of:
//!
//! - [`Region::Backing`]: the flat 64KB backing array at the same address,
//! - [`Region::Ignore`]: nothing (reads return 0, writes are dropped),
//! - [`Region::Device`]: a registered [`Device`], addressed relative to the
//!   start of the range.
//!
//! The lists are scanned in insertion order and the first matching range
//! wins, so overlapping ranges are legal and their order is the integrator's
//! decision. Accesses no range claims fall through to the backing array,
//! unless strict mode is on, in which case they are dropped (and optionally
//! logged).
//!
//! # Example
//!
//! ```rust
//! use cpu6502::{CpuCore, CpuModel, MappedMemory, MemoryBus, RamDevice, Region, RomDevice};
//!
//! let mut memory = MappedMemory::new();
//!
//! // 16KB ROM at $C000, write-protected
//! let mut rom = vec![0xEA; 0x4000];
//! rom[0x3FFC] = 0x00;
//! rom[0x3FFD] = 0xC0;
//! let rom = memory.add_device(Box::new(RomDevice::new(rom)));
//! memory.map_read(0xC000, 0xFFFF, Region::Device(rom)).unwrap();
//! memory.map_write(0xC000, 0xFFFF, Region::Ignore).unwrap();
//!
//! // Scratch RAM at $2000 served by a device, everything else by the backing array
//! let ram = memory.add_device(Box::new(RamDevice::new(0x0800)));
//! memory.map(0x2000, 0x27FF, Region::Device(ram)).unwrap();
//!
//! memory.write(0xC000, 0x00);
//! assert_eq!(memory.read(0xC000), 0xEA);
//!
//! let mut cpu = CpuCore::new(memory, 0xFFFF, 0, CpuModel::Nmos6502);
//! cpu.reset();
//! assert_eq!(cpu.pc(), 0xC000);
//! ```

use std::any::Any;
use std::ops::RangeInclusive;

use log::warn;

use crate::{Error, MemoryBus, Result};

pub mod ram;
pub mod rom;

pub use ram::RamDevice;
pub use rom::RomDevice;

/// A memory-mapped peripheral.
///
/// Offsets are relative to the start of the range the device is mapped at.
/// `read` takes `&self`; devices whose reads have side effects (clearing a
/// status flag, popping a FIFO) keep that state in a `Cell`/`RefCell`.
/// Devices are `Send` so a core over a [`MappedMemory`] can be moved to
/// its own thread.
pub trait Device: Send {
    fn read(&self, offset: u16) -> u8;

    fn write(&mut self, offset: u16, value: u8);

    /// Number of addressable bytes.
    fn size(&self) -> usize;

    /// Enables downcasting through [`MappedMemory::device`].
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Handle returned by [`MappedMemory::add_device`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(usize);

/// Target of a mapped range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Backing,
    Ignore,
    Device(DeviceId),
}

struct Mapping {
    range: RangeInclusive<u16>,
    region: Region,
}

/// A bus built from ordered read and write range lists over a flat backing array.
pub struct MappedMemory {
    backing: Box<[u8; 0x10000]>,
    devices: Vec<Box<dyn Device>>,
    reads: Vec<Mapping>,
    writes: Vec<Mapping>,
    strict: bool,
    log_unmapped: bool,
    direct_zero_page: bool,
    direct_stack_page: bool,
}

impl MappedMemory {
    /// An empty map: every access falls through to a zeroed backing array.
    pub fn new() -> Self {
        Self {
            backing: Box::new([0; 0x10000]),
            devices: Vec::new(),
            reads: Vec::new(),
            writes: Vec::new(),
            strict: false,
            log_unmapped: true,
            direct_zero_page: false,
            direct_stack_page: false,
        }
    }

    /// Registers a device so ranges can refer to it. A device may back any
    /// number of read and write ranges.
    pub fn add_device(&mut self, device: Box<dyn Device>) -> DeviceId {
        self.devices.push(device);
        DeviceId(self.devices.len() - 1)
    }

    /// Appends a range to the read list.
    pub fn map_read(&mut self, start: u16, end: u16, region: Region) -> Result<()> {
        let mapping = self.checked_mapping(start, end, region)?;
        self.reads.push(mapping);
        Ok(())
    }

    /// Appends a range to the write list.
    pub fn map_write(&mut self, start: u16, end: u16, region: Region) -> Result<()> {
        let mapping = self.checked_mapping(start, end, region)?;
        self.writes.push(mapping);
        Ok(())
    }

    /// Appends the same range to both lists.
    pub fn map(&mut self, start: u16, end: u16, region: Region) -> Result<()> {
        self.map_read(start, end, region)?;
        self.map_write(start, end, region)
    }

    fn checked_mapping(&self, start: u16, end: u16, region: Region) -> Result<Mapping> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        if let Region::Device(DeviceId(id)) = region {
            let device = self.devices.get(id).ok_or(Error::UnknownDevice(id))?;
            let span = (end - start) as usize + 1;
            if device.size() < span {
                return Err(Error::RegionTooSmall {
                    start,
                    end,
                    size: device.size(),
                });
            }
        }
        Ok(Mapping {
            range: start..=end,
            region,
        })
    }

    /// Drops unmapped accesses instead of using the backing array.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Whether strict mode logs the accesses it drops.
    pub fn set_log_unmapped(&mut self, enabled: bool) {
        self.log_unmapped = enabled;
    }

    /// Routes page 0 straight to the backing array without scanning ranges.
    pub fn set_direct_zero_page(&mut self, enabled: bool) {
        self.direct_zero_page = enabled;
    }

    /// Routes page 1 straight to the backing array without scanning ranges.
    pub fn set_direct_stack_page(&mut self, enabled: bool) {
        self.direct_stack_page = enabled;
    }

    /// Backing array, bypassing every mapping.
    pub fn backing(&self) -> &[u8] {
        &self.backing[..]
    }

    pub fn backing_mut(&mut self) -> &mut [u8] {
        &mut self.backing[..]
    }

    /// Downcasts a registered device.
    pub fn device<T: Device + 'static>(&self, id: DeviceId) -> Option<&T> {
        self.devices.get(id.0)?.as_any().downcast_ref::<T>()
    }

    pub fn device_mut<T: Device + 'static>(&mut self, id: DeviceId) -> Option<&mut T> {
        self.devices.get_mut(id.0)?.as_any_mut().downcast_mut::<T>()
    }

    fn is_direct(&self, addr: u16) -> bool {
        match addr >> 8 {
            0x00 => self.direct_zero_page,
            0x01 => self.direct_stack_page,
            _ => false,
        }
    }
}

impl Default for MappedMemory {
    fn default() -> Self {
        Self::new()
    }
}

fn find(list: &[Mapping], addr: u16) -> Option<(Region, u16)> {
    list.iter()
        .find(|mapping| mapping.range.contains(&addr))
        .map(|mapping| (mapping.region, addr - mapping.range.start()))
}

impl MemoryBus for MappedMemory {
    fn read(&self, addr: u16) -> u8 {
        if self.is_direct(addr) {
            return self.backing[addr as usize];
        }
        match find(&self.reads, addr) {
            Some((Region::Backing, _)) => self.backing[addr as usize],
            Some((Region::Ignore, _)) => 0,
            Some((Region::Device(DeviceId(id)), offset)) => {
                self.devices.get(id).map_or(0, |device| device.read(offset))
            }
            None if self.strict => {
                if self.log_unmapped {
                    warn!("unmapped read at ${:04X}", addr);
                }
                0
            }
            None => self.backing[addr as usize],
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if self.is_direct(addr) {
            self.backing[addr as usize] = value;
            return;
        }
        match find(&self.writes, addr) {
            Some((Region::Backing, _)) => self.backing[addr as usize] = value,
            Some((Region::Ignore, _)) => {}
            Some((Region::Device(DeviceId(id)), offset)) => {
                if let Some(device) = self.devices.get_mut(id) {
                    device.write(offset, value);
                }
            }
            None if self.strict => {
                if self.log_unmapped {
                    warn!("unmapped write of ${:02X} at ${:04X}", value, addr);
                }
            }
            None => self.backing[addr as usize] = value,
        }
    }
}

use std::ops::RangeInclusive;

use log::{trace, warn};

use crate::core::cpu::context::MemoryAccess;
use crate::core::error::{HardwareError, Result};

pub const MEMORY_SIZE: usize = 0x10000;

/// 平坦 64KB 記憶體；可指定一段未映射區域，存取時回報匯流排錯誤
pub struct MMU {
    pub memory: Box<[u8; MEMORY_SIZE]>,
    unmapped: Option<RangeInclusive<u16>>,
}

impl Default for MMU {
    fn default() -> Self {
        MMU {
            memory: Box::new([0; MEMORY_SIZE]),
            unmapped: None,
        }
    }
}

impl std::fmt::Debug for MMU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MMU")
            .field("unmapped", &self.unmapped)
            .finish_non_exhaustive()
    }
}

impl MMU {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unmapped(range: RangeInclusive<u16>) -> Self {
        MMU {
            unmapped: Some(range),
            ..Self::default()
        }
    }

    pub fn set_unmapped(&mut self, range: Option<RangeInclusive<u16>>) {
        self.unmapped = range;
    }

    pub fn is_mapped(&self, addr: u16) -> bool {
        !self.unmapped.as_ref().is_some_and(|r| r.contains(&addr))
    }

    /// 直接寫入一段資料，不經過映射檢查 (載入快照用)
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        for (offset, &byte) in bytes.iter().enumerate() {
            let target = addr.wrapping_add(offset as u16);
            self.memory[target as usize] = byte;
        }
    }

    /// 不觸發錯誤的讀取，測試與除錯用
    pub fn peek(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    pub fn read_byte(&self, addr: u16) -> Result<u8> {
        if !self.is_mapped(addr) {
            warn!("[MMU_READ] unmapped addr={:04X}", addr);
            return Err(HardwareError::MemoryRead(addr).into());
        }
        Ok(self.memory[addr as usize])
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) -> Result<()> {
        if !self.is_mapped(addr) {
            warn!("[MMU_WRITE] unmapped addr={:04X} value={:02X}", addr, value);
            return Err(HardwareError::MemoryWrite(addr).into());
        }
        trace!("[MMU_WRITE] addr={:04X} value={:02X}", addr, value);
        self.memory[addr as usize] = value;
        Ok(())
    }
}

impl MemoryAccess for MMU {
    fn read_byte(&mut self, addr: u16) -> Result<u8> {
        MMU::read_byte(self, addr)
    }

    fn write_byte(&mut self, addr: u16, value: u8) -> Result<()> {
        MMU::write_byte(self, addr, value)
    }
}

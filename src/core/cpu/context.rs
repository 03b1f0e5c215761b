//! CB 執行核心所需的外部介面。
//!
//! 暫存器、旗標與記憶體都屬於呼叫端的 CPU；核心只透過這些 trait 存取，
//! 且每次呼叫都以 `&mut` 傳入，因此不會有重入或共享狀態。

use super::register_utils::FlagOperations;
use crate::core::error::Result;

/// 8 位元暫存器存取；HL 只作為記憶體位址使用
pub trait RegisterAccess {
    fn get_a(&self) -> u8;
    fn set_a(&mut self, value: u8);
    fn get_b(&self) -> u8;
    fn set_b(&mut self, value: u8);
    fn get_c(&self) -> u8;
    fn set_c(&mut self, value: u8);
    fn get_d(&self) -> u8;
    fn set_d(&mut self, value: u8);
    fn get_e(&self) -> u8;
    fn set_e(&mut self, value: u8);
    fn get_h(&self) -> u8;
    fn set_h(&mut self, value: u8);
    fn get_l(&self) -> u8;
    fn set_l(&mut self, value: u8);

    fn get_hl(&self) -> u16 {
        ((self.get_h() as u16) << 8) | (self.get_l() as u16)
    }
}

/// 位元組層級的記憶體匯流排
pub trait MemoryAccess {
    fn read_byte(&mut self, addr: u16) -> Result<u8>;
    fn write_byte(&mut self, addr: u16, value: u8) -> Result<()>;
}

/// 執行 CB 指令所需的完整 CPU 介面
pub trait CpuContext: RegisterAccess + FlagOperations + MemoryAccess {}

impl<T: RegisterAccess + FlagOperations + MemoryAccess + ?Sized> CpuContext for T {}

use log::debug;

use super::cb;
use super::context::{MemoryAccess, RegisterAccess};
use super::register_utils::FlagOperations;
use super::registers::{Model, Registers};
use crate::core::error::Result;
use crate::core::mmu::MMU;

/// 最小的 CPU 外殼：擁有暫存器與記憶體，並統計每個 CB opcode 的執行次數
pub struct CPU {
    pub registers: Registers,
    pub mmu: MMU,
    pub cb_usage: [u64; 256],
}

impl Default for CPU {
    fn default() -> Self {
        CPU {
            registers: Registers::default(),
            mmu: MMU::default(),
            cb_usage: [0; 256],
        }
    }
}

impl std::fmt::Debug for CPU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("registers", &self.registers)
            .field("mmu", &self.mmu)
            .finish_non_exhaustive()
    }
}

impl CPU {
    pub fn new(mut registers: Registers, mmu: MMU) -> Self {
        registers.set_f(registers.f);
        CPU {
            registers,
            mmu,
            ..Self::default()
        }
    }

    pub fn post_boot(model: Model, cgb_mode: bool) -> Self {
        let registers = Registers::post_boot(model, cgb_mode);
        debug!("[REGISTERS_INIT] {:?} cgb={} {}", model, cgb_mode, registers);
        Self::new(registers, MMU::default())
    }

    /// 執行 0xCB 之後的位元組；只有成功執行才計入統計
    pub fn execute_cb(&mut self, opcode: u8) -> Result<()> {
        cb::execute(self, opcode)?;
        self.cb_usage[opcode as usize] += 1;
        Ok(())
    }

    /// 執行次數最多的前 n 個 opcode，次數相同時 opcode 小者在前
    pub fn most_used(&self, n: usize) -> Vec<(u8, u64)> {
        let mut used: Vec<(u8, u64)> = self
            .cb_usage
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(op, &count)| (op as u8, count))
            .collect();
        used.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        used.truncate(n);
        used
    }
}

impl RegisterAccess for CPU {
    fn get_a(&self) -> u8 {
        self.registers.a
    }
    fn set_a(&mut self, value: u8) {
        self.registers.a = value;
    }
    fn get_b(&self) -> u8 {
        self.registers.b
    }
    fn set_b(&mut self, value: u8) {
        self.registers.b = value;
    }
    fn get_c(&self) -> u8 {
        self.registers.c
    }
    fn set_c(&mut self, value: u8) {
        self.registers.c = value;
    }
    fn get_d(&self) -> u8 {
        self.registers.d
    }
    fn set_d(&mut self, value: u8) {
        self.registers.d = value;
    }
    fn get_e(&self) -> u8 {
        self.registers.e
    }
    fn set_e(&mut self, value: u8) {
        self.registers.e = value;
    }
    fn get_h(&self) -> u8 {
        self.registers.h
    }
    fn set_h(&mut self, value: u8) {
        self.registers.h = value;
    }
    fn get_l(&self) -> u8 {
        self.registers.l
    }
    fn set_l(&mut self, value: u8) {
        self.registers.l = value;
    }
    fn get_hl(&self) -> u16 {
        self.registers.get_hl()
    }
}

impl FlagOperations for CPU {
    fn set_zero(&mut self, value: bool) {
        self.registers.set_zero(value);
    }
    fn set_subtract(&mut self, value: bool) {
        self.registers.set_subtract(value);
    }
    fn set_half_carry(&mut self, value: bool) {
        self.registers.set_half_carry(value);
    }
    fn set_carry(&mut self, value: bool) {
        self.registers.set_carry(value);
    }
    fn get_zero(&self) -> bool {
        self.registers.get_zero()
    }
    fn get_subtract(&self) -> bool {
        self.registers.get_subtract()
    }
    fn get_half_carry(&self) -> bool {
        self.registers.get_half_carry()
    }
    fn get_carry(&self) -> bool {
        self.registers.get_carry()
    }
}

impl MemoryAccess for CPU {
    fn read_byte(&mut self, addr: u16) -> Result<u8> {
        self.mmu.read_byte(addr)
    }

    fn write_byte(&mut self, addr: u16, value: u8) -> Result<()> {
        self.mmu.write_byte(addr, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_counts_successful_executions() {
        let mut cpu = CPU::post_boot(Model::GB, false);
        cpu.execute_cb(0x37).unwrap();
        cpu.execute_cb(0x37).unwrap();
        cpu.execute_cb(0x00).unwrap();
        cpu.mmu.set_unmapped(Some(0x014D..=0x014D));
        assert!(cpu.execute_cb(0x06).is_err());
        assert_eq!(cpu.most_used(8), vec![(0x37, 2), (0x00, 1)]);
        assert_eq!(cpu.most_used(1), vec![(0x37, 2)]);
    }

    #[test]
    fn new_masks_flag_low_nibble() {
        let registers = Registers {
            f: 0xFF,
            ..Registers::default()
        };
        let cpu = CPU::new(registers, MMU::default());
        assert_eq!(cpu.registers.f, 0xF0);
    }

    #[test]
    fn post_boot_hl_is_memory_operand() {
        let mut cpu = CPU::post_boot(Model::GB, false);
        cpu.mmu.load(0x014D, &[0x0F]);
        cpu.execute_cb(0x36).unwrap();
        assert_eq!(cpu.mmu.peek(0x014D), 0xF0);
    }
}

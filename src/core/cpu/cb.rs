//! CB 前綴指令分派表
//!
//! 256 筆在編譯期由 `build_table` 逐一解碼建立，每筆綁定該 opcode 專屬的
//! handler 以及已解析的運算元與位元索引，執行時只需以 opcode 為索引取表。
//!
//! (HL) 的讀寫都在旗標更新之前完成，記憶體錯誤時 CPU 狀態不會有任何改變。

use log::trace;

use super::bit;
use super::context::CpuContext;
use super::flags::FlagUpdate;
use super::instruction::{CbInstruction, CbOp, ShiftOp};
use super::register_utils::RegTarget;
use super::rotate::{self, Shifted};
use crate::core::error::Result;

pub type CbHandler = fn(&mut dyn CpuContext, RegTarget, u8) -> Result<()>;

#[derive(Clone, Copy)]
pub struct CbEntry {
    pub instruction: CbInstruction,
    /// BIT/RES/SET 的位元索引，旋轉/位移族為 0
    pub bit: u8,
    handler: CbHandler,
}

impl std::fmt::Debug for CbEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CbEntry")
            .field("instruction", &self.instruction)
            .field("bit", &self.bit)
            .finish_non_exhaustive()
    }
}

impl CbEntry {
    #[inline]
    pub fn run(&self, ctx: &mut dyn CpuContext) -> Result<()> {
        (self.handler)(ctx, self.instruction.target, self.bit)
    }
}

pub static CB_TABLE: [CbEntry; 256] = build_table();

const fn build_table() -> [CbEntry; 256] {
    let mut table = [CbEntry {
        instruction: CbInstruction::decode(0),
        bit: 0,
        handler: rlc_r,
    }; 256];
    let mut op = 0;
    while op < 256 {
        let instruction = CbInstruction::decode(op as u8);
        let bit = match instruction.op {
            CbOp::Bit(bit) | CbOp::Res(bit) | CbOp::Set(bit) => bit,
            CbOp::Shift(_) => 0,
        };
        table[op] = CbEntry {
            instruction,
            bit,
            handler: handler_for(instruction.op),
        };
        op += 1;
    }
    table
}

const fn handler_for(op: CbOp) -> CbHandler {
    match op {
        CbOp::Shift(ShiftOp::Rlc) => rlc_r,
        CbOp::Shift(ShiftOp::Rrc) => rrc_r,
        CbOp::Shift(ShiftOp::Rl) => rl_r,
        CbOp::Shift(ShiftOp::Rr) => rr_r,
        CbOp::Shift(ShiftOp::Sla) => sla_r,
        CbOp::Shift(ShiftOp::Sra) => sra_r,
        CbOp::Shift(ShiftOp::Swap) => swap_r,
        CbOp::Shift(ShiftOp::Srl) => srl_r,
        CbOp::Bit(_) => bit_b_r,
        CbOp::Res(_) => res_b_r,
        CbOp::Set(_) => set_b_r,
    }
}

/// 執行一個 CB opcode (前綴 0xCB 之後的位元組)
pub fn execute(ctx: &mut dyn CpuContext, opcode: u8) -> Result<()> {
    let entry = &CB_TABLE[opcode as usize];
    trace!("[CB] {:02X}: {}", opcode, entry.instruction);
    entry.run(ctx)
}

#[inline(always)]
fn shift_r(
    ctx: &mut dyn CpuContext,
    target: RegTarget,
    transform: fn(u8, bool) -> Shifted,
) -> Result<()> {
    let value = target.read(ctx)?;
    let shifted = transform(value, ctx.get_carry());
    target.write(ctx, shifted.value)?;
    FlagUpdate::shifted(shifted.value, shifted.carry).apply(ctx);
    Ok(())
}

fn rlc_r(ctx: &mut dyn CpuContext, target: RegTarget, _bit: u8) -> Result<()> {
    shift_r(ctx, target, rotate::rlc)
}

fn rrc_r(ctx: &mut dyn CpuContext, target: RegTarget, _bit: u8) -> Result<()> {
    shift_r(ctx, target, rotate::rrc)
}

fn rl_r(ctx: &mut dyn CpuContext, target: RegTarget, _bit: u8) -> Result<()> {
    shift_r(ctx, target, rotate::rl)
}

fn rr_r(ctx: &mut dyn CpuContext, target: RegTarget, _bit: u8) -> Result<()> {
    shift_r(ctx, target, rotate::rr)
}

fn sla_r(ctx: &mut dyn CpuContext, target: RegTarget, _bit: u8) -> Result<()> {
    shift_r(ctx, target, rotate::sla)
}

fn sra_r(ctx: &mut dyn CpuContext, target: RegTarget, _bit: u8) -> Result<()> {
    shift_r(ctx, target, rotate::sra)
}

fn swap_r(ctx: &mut dyn CpuContext, target: RegTarget, _bit: u8) -> Result<()> {
    shift_r(ctx, target, rotate::swap)
}

fn srl_r(ctx: &mut dyn CpuContext, target: RegTarget, _bit: u8) -> Result<()> {
    shift_r(ctx, target, rotate::srl)
}

// BIT 不寫回，(HL) 只讀一次
fn bit_b_r(ctx: &mut dyn CpuContext, target: RegTarget, bit: u8) -> Result<()> {
    let value = target.read(ctx)?;
    FlagUpdate::bit_test(bit::test(value, bit)).apply(ctx);
    Ok(())
}

fn res_b_r(ctx: &mut dyn CpuContext, target: RegTarget, bit: u8) -> Result<()> {
    let value = target.read(ctx)?;
    target.write(ctx, bit::res(value, bit))?;
    FlagUpdate::UNCHANGED.apply(ctx);
    Ok(())
}

fn set_b_r(ctx: &mut dyn CpuContext, target: RegTarget, bit: u8) -> Result<()> {
    let value = target.read(ctx)?;
    target.write(ctx, bit::set(value, bit))?;
    FlagUpdate::UNCHANGED.apply(ctx);
    Ok(())
}

//! Game Boy (SM83) CB 前綴指令執行核心。
//!
//! 外部 fetch 迴圈辨識 0xCB 前綴後，以下一個位元組呼叫 [`execute`]
//! (或直接索引 [`CB_TABLE`])。暫存器、旗標與記憶體都透過
//! [`CpuContext`] 由呼叫端提供。

pub mod core;

pub use crate::core::cpu::{
    CB_TABLE, CPU, CbEntry, CbInstruction, CbOp, CpuContext, FlagOperations, FlagUpdate, Flags,
    MemoryAccess, Model, RegTarget, RegisterAccess, Registers, ShiftOp, execute,
};
pub use crate::core::emulator::{Emulator, Snapshot};
pub use crate::core::error::{Error, HardwareError, Result};
pub use crate::core::mmu::MMU;

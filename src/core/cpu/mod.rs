pub mod bit;
pub mod cb;
pub mod context;
#[allow(clippy::module_inception)]
pub mod cpu;
pub mod flags;
pub mod instruction;
pub mod register_utils;
pub mod registers;
pub mod rotate;

pub use cb::{CB_TABLE, CbEntry, execute};
pub use context::{CpuContext, MemoryAccess, RegisterAccess};
pub use cpu::CPU;
pub use flags::{FlagUpdate, Flags};
pub use instruction::{CbInstruction, CbOp, ShiftOp};
pub use register_utils::{FlagOperations, RegTarget};
pub use registers::{Model, Registers};

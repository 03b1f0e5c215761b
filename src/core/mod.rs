pub mod cpu;
pub mod emulator;
pub mod error;
pub mod mmu;
pub mod utils;

pub mod mmu;

pub use mmu::MMU;

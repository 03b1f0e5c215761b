use super::context::CpuContext;
use crate::core::error::Result;

/// CB 指令的運算元位置；順序與 opcode 低 3 位元一致
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegTarget {
    B,
    C,
    D,
    E,
    H,
    L,
    HL,
    A,
}

impl std::fmt::Debug for RegTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::Display for RegTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl RegTarget {
    pub const ALL: [RegTarget; 8] = [
        RegTarget::B,
        RegTarget::C,
        RegTarget::D,
        RegTarget::E,
        RegTarget::H,
        RegTarget::L,
        RegTarget::HL,
        RegTarget::A,
    ];

    /// 只看低 3 位元，所有輸入都有對應位置
    pub const fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    pub const fn name(self) -> &'static str {
        match self {
            RegTarget::B => "B",
            RegTarget::C => "C",
            RegTarget::D => "D",
            RegTarget::E => "E",
            RegTarget::H => "H",
            RegTarget::L => "L",
            RegTarget::HL => "(HL)",
            RegTarget::A => "A",
        }
    }

    pub const fn is_memory(self) -> bool {
        matches!(self, RegTarget::HL)
    }

    /// 讀取運算元；(HL) 會經過記憶體匯流排，可能失敗
    #[inline]
    pub fn read(self, ctx: &mut dyn CpuContext) -> Result<u8> {
        Ok(match self {
            RegTarget::B => ctx.get_b(),
            RegTarget::C => ctx.get_c(),
            RegTarget::D => ctx.get_d(),
            RegTarget::E => ctx.get_e(),
            RegTarget::H => ctx.get_h(),
            RegTarget::L => ctx.get_l(),
            RegTarget::HL => {
                let addr = ctx.get_hl();
                ctx.read_byte(addr)?
            }
            RegTarget::A => ctx.get_a(),
        })
    }

    /// 寫回運算元；(HL) 寫回同一個位址
    #[inline]
    pub fn write(self, ctx: &mut dyn CpuContext, value: u8) -> Result<()> {
        match self {
            RegTarget::B => ctx.set_b(value),
            RegTarget::C => ctx.set_c(value),
            RegTarget::D => ctx.set_d(value),
            RegTarget::E => ctx.set_e(value),
            RegTarget::H => ctx.set_h(value),
            RegTarget::L => ctx.set_l(value),
            RegTarget::HL => {
                let addr = ctx.get_hl();
                ctx.write_byte(addr, value)?;
            }
            RegTarget::A => ctx.set_a(value),
        }
        Ok(())
    }
}

// 標誌位操作 trait
pub trait FlagOperations {
    fn set_zero(&mut self, value: bool);
    fn set_subtract(&mut self, value: bool);
    fn set_half_carry(&mut self, value: bool);
    fn set_carry(&mut self, value: bool);
    fn get_zero(&self) -> bool;
    fn get_subtract(&self) -> bool;
    fn get_half_carry(&self) -> bool;
    fn get_carry(&self) -> bool;
}

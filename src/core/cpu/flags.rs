use bitflags::bitflags;

use super::register_utils::FlagOperations;

bitflags! {
    /// F 暫存器高 4 位元
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
    pub struct Flags: u8 {
        const Z = 0x80; // Zero
        const N = 0x40; // Subtract
        const H = 0x20; // Half-carry
        const C = 0x10; // Carry
    }
}

impl Flags {
    /// 以 `ZNHC` 字串表示，未設定的位元以 `-` 顯示
    pub fn to_znhc(self) -> String {
        [
            (Flags::Z, 'Z'),
            (Flags::N, 'N'),
            (Flags::H, 'H'),
            (Flags::C, 'C'),
        ]
        .iter()
        .map(|&(flag, ch)| if self.contains(flag) { ch } else { '-' })
        .collect()
    }
}

/// 單一指令對四個旗標的更新。`None` 表示該旗標不在指令的規格內，保持原值。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlagUpdate {
    pub zero: Option<bool>,
    pub subtract: Option<bool>,
    pub half_carry: Option<bool>,
    pub carry: Option<bool>,
}

impl FlagUpdate {
    /// RES/SET: 不影響任何旗標
    pub const UNCHANGED: FlagUpdate = FlagUpdate {
        zero: None,
        subtract: None,
        half_carry: None,
        carry: None,
    };

    /// 旋轉/位移族：Z 依結果，N/H 清除，C 取自原值的取樣位元
    pub const fn shifted(result: u8, carry: bool) -> Self {
        FlagUpdate {
            zero: Some(result == 0),
            subtract: Some(false),
            half_carry: Some(false),
            carry: Some(carry),
        }
    }

    /// BIT: Z 為被測位元的反相，N 清除，H 強制為 1，C 不變
    pub const fn bit_test(bit_set: bool) -> Self {
        FlagUpdate {
            zero: Some(!bit_set),
            subtract: Some(false),
            half_carry: Some(true),
            carry: None,
        }
    }

    pub fn apply<F: FlagOperations + ?Sized>(self, target: &mut F) {
        if let Some(z) = self.zero {
            target.set_zero(z);
        }
        if let Some(n) = self.subtract {
            target.set_subtract(n);
        }
        if let Some(h) = self.half_carry {
            target.set_half_carry(h);
        }
        if let Some(c) = self.carry {
            target.set_carry(c);
        }
    }
}

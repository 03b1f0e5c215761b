//! 旋轉/位移族 (CB 00~3F) 的純函式
//!
//! 每個函式接收原值與舊的 C 旗標，回傳結果與新的 C；C 一律取自原值。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shifted {
    pub value: u8,
    pub carry: bool,
}

pub const fn rlc(value: u8, _carry: bool) -> Shifted {
    Shifted {
        value: value.rotate_left(1),
        carry: value & 0x80 != 0,
    }
}

pub const fn rrc(value: u8, _carry: bool) -> Shifted {
    Shifted {
        value: value.rotate_right(1),
        carry: value & 0x01 != 0,
    }
}

pub const fn rl(value: u8, carry: bool) -> Shifted {
    Shifted {
        value: (value << 1) | carry as u8,
        carry: value & 0x80 != 0,
    }
}

pub const fn rr(value: u8, carry: bool) -> Shifted {
    Shifted {
        value: (value >> 1) | ((carry as u8) << 7),
        carry: value & 0x01 != 0,
    }
}

pub const fn sla(value: u8, _carry: bool) -> Shifted {
    Shifted {
        value: value << 1,
        carry: value & 0x80 != 0,
    }
}

/// 算術右移，bit 7 保持不變
pub const fn sra(value: u8, _carry: bool) -> Shifted {
    Shifted {
        value: (value >> 1) | (value & 0x80),
        carry: value & 0x01 != 0,
    }
}

/// 高低 nibble 交換，C 固定清除
pub const fn swap(value: u8, _carry: bool) -> Shifted {
    Shifted {
        value: ((value & 0x0F) << 4) | ((value & 0xF0) >> 4),
        carry: false,
    }
}

pub const fn srl(value: u8, _carry: bool) -> Shifted {
    Shifted {
        value: value >> 1,
        carry: value & 0x01 != 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rlc_samples_bit7() {
        assert_eq!(rlc(0x85, false), Shifted { value: 0x0B, carry: true });
        assert_eq!(rlc(0x00, true), Shifted { value: 0x00, carry: false });
    }

    #[test]
    fn rrc_samples_bit0() {
        assert_eq!(rrc(0x01, false), Shifted { value: 0x80, carry: true });
        assert_eq!(rrc(0x10, true), Shifted { value: 0x08, carry: false });
    }

    #[test]
    fn through_carry_rotations_use_old_carry() {
        assert_eq!(rl(0x80, false), Shifted { value: 0x00, carry: true });
        assert_eq!(rl(0x11, true), Shifted { value: 0x23, carry: false });
        assert_eq!(rr(0x01, false), Shifted { value: 0x00, carry: true });
        assert_eq!(rr(0x8A, true), Shifted { value: 0xC5, carry: false });
    }

    #[test]
    fn shifts() {
        assert_eq!(sla(0xFF, false), Shifted { value: 0xFE, carry: true });
        assert_eq!(sra(0x80, false), Shifted { value: 0xC0, carry: false });
        assert_eq!(sra(0x01, false), Shifted { value: 0x00, carry: true });
        assert_eq!(srl(0xFF, false), Shifted { value: 0x7F, carry: true });
        assert_eq!(srl(0x80, true), Shifted { value: 0x40, carry: false });
    }

    #[test]
    fn swap_exchanges_nibbles_and_clears_carry() {
        assert_eq!(swap(0x12, true), Shifted { value: 0x21, carry: false });
        assert_eq!(swap(0xF0, false), Shifted { value: 0x0F, carry: false });
        for v in 0..=0xFFu8 {
            assert_eq!(swap(swap(v, false).value, false).value, v);
        }
    }
}

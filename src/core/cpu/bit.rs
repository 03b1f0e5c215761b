//! BIT / RES / SET (CB 40~FF)

const fn mask(bit: u8) -> u8 {
    1 << (bit & 0x07)
}

/// 該位元是否為 1
pub const fn test(value: u8, bit: u8) -> bool {
    value & mask(bit) != 0
}

pub const fn res(value: u8, bit: u8) -> u8 {
    value & !mask(bit)
}

pub const fn set(value: u8, bit: u8) -> u8 {
    value | mask(bit)
}

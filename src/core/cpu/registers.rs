use serde::{Deserialize, Deserializer, Serialize};

use super::context::RegisterAccess;
use super::flags::Flags;
use super::register_utils::FlagOperations;

macro_rules! get_set {
    ($reg:ident, $get_name:ident, $set_name:ident) => {
        pub fn $get_name(&self) -> u8 {
            self.$reg
        }

        pub fn $set_name(&mut self, value: u8) {
            self.$reg = value;
        }
    };
}

macro_rules! get_set_dual {
    ($reg1:ident, $reg2:ident, $get_name:ident, $set_name:ident) => {
        pub fn $get_name(&self) -> u16 {
            ((self.$reg1 as u16) << 8) | self.$reg2 as u16
        }

        pub fn $set_name(&mut self, value: u16) {
            self.$reg1 = (value >> 8) as u8;
            self.$reg2 = value as u8;
        }
    };
}

/// 開機程式結束後的機種
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Model {
    /// 初代 DMG
    #[default]
    GB,
    /// Pocket / Light
    GBP,
    GBC,
    /// Super Game Boy
    SGB,
    SGB2,
    GBA,
    GBASP,
}

impl Model {
    /// 開機後的 AF/BC/DE/HL；GBC 與 GBA 在彩色模式下數值不同
    pub const fn post_boot_pairs(self, cgb_mode: bool) -> [u16; 4] {
        match (self, cgb_mode) {
            (Model::GB, _) => [0x01B0, 0x0013, 0x00D8, 0x014D],
            (Model::GBP, _) => [0xFFB0, 0x0013, 0x00D8, 0x014D],
            (Model::SGB, _) => [0x0100, 0x0014, 0x0000, 0xC060],
            (Model::SGB2, _) => [0xFF00, 0x0000, 0x0000, 0x0000],
            (Model::GBC, false) => [0x1180, 0x0000, 0x0008, 0x007C],
            (Model::GBC, true) => [0x1180, 0x0000, 0xFF56, 0x000D],
            (Model::GBA | Model::GBASP, false) => [0x1100, 0x0100, 0x0008, 0x007C],
            (Model::GBA | Model::GBASP, true) => [0x1100, 0x0100, 0xFF56, 0x000D],
        }
    }
}

impl std::str::FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gb" | "dmg" => Ok(Model::GB),
            "gbp" | "mgb" => Ok(Model::GBP),
            "gbc" | "cgb" => Ok(Model::GBC),
            "sgb" => Ok(Model::SGB),
            "sgb2" => Ok(Model::SGB2),
            "gba" => Ok(Model::GBA),
            "gbasp" => Ok(Model::GBASP),
            other => Err(format!("unknown model `{other}`")),
        }
    }
}

/// SM83 8 位元暫存器組；F 低 4 位元永遠為 0
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Registers {
    pub a: u8,
    #[serde(deserialize_with = "deserialize_f")]
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
}

// 快照載入時就遮掉 F 的低 4 位元
fn deserialize_f<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    Ok(u8::deserialize(deserializer)? & 0xF0)
}

impl Registers {
    pub fn post_boot(model: Model, cgb_mode: bool) -> Self {
        let [af, bc, de, hl] = model.post_boot_pairs(cgb_mode);
        let mut regs = Registers::default();
        regs.set_af(af);
        regs.set_bc(bc);
        regs.set_de(de);
        regs.set_hl(hl);
        regs
    }

    get_set!(a, get_a, set_a);
    get_set!(b, get_b, set_b);
    get_set!(c, get_c, set_c);
    get_set!(d, get_d, set_d);
    get_set!(e, get_e, set_e);
    get_set!(h, get_h, set_h);
    get_set!(l, get_l, set_l);

    get_set_dual!(b, c, get_bc, set_bc);
    get_set_dual!(d, e, get_de, set_de);
    get_set_dual!(h, l, get_hl, set_hl);

    pub fn get_f(&self) -> u8 {
        self.f & 0xF0
    }

    pub fn set_f(&mut self, value: u8) {
        self.f = value & 0xF0;
    }

    pub fn get_af(&self) -> u16 {
        ((self.a as u16) << 8) | self.get_f() as u16
    }

    pub fn set_af(&mut self, value: u16) {
        self.a = (value >> 8) as u8;
        self.set_f(value as u8);
    }

    pub fn flags(&self) -> Flags {
        Flags::from_bits_truncate(self.f)
    }

    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        let mut flags = self.flags();
        flags.set(flag, value);
        self.f = flags.bits();
    }
}

impl FlagOperations for Registers {
    fn set_zero(&mut self, value: bool) {
        self.set_flag(Flags::Z, value);
    }
    fn set_subtract(&mut self, value: bool) {
        self.set_flag(Flags::N, value);
    }
    fn set_half_carry(&mut self, value: bool) {
        self.set_flag(Flags::H, value);
    }
    fn set_carry(&mut self, value: bool) {
        self.set_flag(Flags::C, value);
    }
    fn get_zero(&self) -> bool {
        self.flags().contains(Flags::Z)
    }
    fn get_subtract(&self) -> bool {
        self.flags().contains(Flags::N)
    }
    fn get_half_carry(&self) -> bool {
        self.flags().contains(Flags::H)
    }
    fn get_carry(&self) -> bool {
        self.flags().contains(Flags::C)
    }
}

impl RegisterAccess for Registers {
    fn get_a(&self) -> u8 {
        self.a
    }
    fn set_a(&mut self, value: u8) {
        self.a = value;
    }
    fn get_b(&self) -> u8 {
        self.b
    }
    fn set_b(&mut self, value: u8) {
        self.b = value;
    }
    fn get_c(&self) -> u8 {
        self.c
    }
    fn set_c(&mut self, value: u8) {
        self.c = value;
    }
    fn get_d(&self) -> u8 {
        self.d
    }
    fn set_d(&mut self, value: u8) {
        self.d = value;
    }
    fn get_e(&self) -> u8 {
        self.e
    }
    fn set_e(&mut self, value: u8) {
        self.e = value;
    }
    fn get_h(&self) -> u8 {
        self.h
    }
    fn set_h(&mut self, value: u8) {
        self.h = value;
    }
    fn get_l(&self) -> u8 {
        self.l
    }
    fn set_l(&mut self, value: u8) {
        self.l = value;
    }
    fn get_hl(&self) -> u16 {
        Registers::get_hl(self)
    }
}

impl std::fmt::Display for Registers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AF: {:04X} BC: {:04X} DE: {:04X} HL: {:04X} [{}]",
            self.get_af(),
            self.get_bc(),
            self.get_de(),
            self.get_hl(),
            self.flags().to_znhc()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f_low_nibble_is_masked() {
        let mut regs = Registers::default();
        regs.set_af(0x12FF);
        assert_eq!(regs.get_a(), 0x12);
        assert_eq!(regs.get_f(), 0xF0);
        assert_eq!(regs.get_af(), 0x12F0);
    }

    #[test]
    fn pairs_compose_high_low() {
        let mut regs = Registers::default();
        regs.set_hl(0xC0DE);
        assert_eq!(regs.get_h(), 0xC0);
        assert_eq!(regs.get_l(), 0xDE);
        regs.set_b(0xAB);
        regs.set_c(0xCD);
        assert_eq!(regs.get_bc(), 0xABCD);
    }

    #[test]
    fn dmg_post_boot_state() {
        let regs = Registers::post_boot(Model::GB, false);
        assert_eq!(regs.get_af(), 0x01B0);
        assert_eq!(regs.get_bc(), 0x0013);
        assert_eq!(regs.get_de(), 0x00D8);
        assert_eq!(regs.get_hl(), 0x014D);
        assert!(regs.get_zero() && !regs.get_subtract() && regs.get_half_carry() && regs.get_carry());
    }

    #[test]
    fn cgb_mode_changes_de_hl() {
        let dmg = Registers::post_boot(Model::GBC, false);
        let cgb = Registers::post_boot(Model::GBC, true);
        assert_eq!(dmg.get_af(), cgb.get_af());
        assert_eq!(cgb.get_de(), 0xFF56);
        assert_eq!(cgb.get_hl(), 0x000D);
    }

    #[test]
    fn display_dump() {
        let regs = Registers::post_boot(Model::GB, false);
        assert_eq!(
            regs.to_string(),
            "AF: 01B0 BC: 0013 DE: 00D8 HL: 014D [Z-HC]"
        );
    }

    #[test]
    fn deserialized_f_drops_low_nibble() {
        let regs: Registers = serde_json::from_str(r#"{"a":1,"f":255}"#).unwrap();
        assert_eq!(regs.f, 0xF0);
        assert_eq!(regs, Registers { a: 1, f: 0xF0, ..Registers::default() });
    }

    #[test]
    fn model_parsing() {
        assert_eq!("cgb".parse::<Model>(), Ok(Model::GBC));
        assert!("nes".parse::<Model>().is_err());
    }
}

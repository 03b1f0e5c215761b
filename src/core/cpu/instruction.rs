//! CB 前綴 opcode 解碼
//!
//! 每個位元組固定切成 `group = op >> 6`、`subop = (op >> 3) & 7`、
//! `operand = op & 7` 三段，256 個值都有對應指令。

use serde::{Deserialize, Serialize};

use crate::core::cpu::register_utils::RegTarget;

/// 旋轉/位移族的子運算，順序與 subop 一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    pub const ALL: [ShiftOp; 8] = [
        ShiftOp::Rlc,
        ShiftOp::Rrc,
        ShiftOp::Rl,
        ShiftOp::Rr,
        ShiftOp::Sla,
        ShiftOp::Sra,
        ShiftOp::Swap,
        ShiftOp::Srl,
    ];

    pub const fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            ShiftOp::Rlc => "RLC",
            ShiftOp::Rrc => "RRC",
            ShiftOp::Rl => "RL",
            ShiftOp::Rr => "RR",
            ShiftOp::Sla => "SLA",
            ShiftOp::Sra => "SRA",
            ShiftOp::Swap => "SWAP",
            ShiftOp::Srl => "SRL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CbOp {
    Shift(ShiftOp),
    Bit(u8),
    Res(u8),
    Set(u8),
}

impl CbOp {
    /// BIT 只讀不寫
    pub const fn writes_back(self) -> bool {
        !matches!(self, CbOp::Bit(_))
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            CbOp::Shift(op) => op.mnemonic(),
            CbOp::Bit(_) => "BIT",
            CbOp::Res(_) => "RES",
            CbOp::Set(_) => "SET",
        }
    }

    /// 指令對 Z/N/H/C 的影響
    pub const fn flag_effects(self) -> [FlagEffect; 4] {
        use FlagEffect::*;
        match self {
            CbOp::Shift(ShiftOp::Swap) => [Computed, Reset, Reset, Reset],
            CbOp::Shift(_) => [Computed, Reset, Reset, Computed],
            CbOp::Bit(_) => [Computed, Reset, Set, Unchanged],
            CbOp::Res(_) | CbOp::Set(_) => [Unchanged, Unchanged, Unchanged, Unchanged],
        }
    }
}

/// opcode 的三段位元切片
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CbFields {
    pub group: u8,
    pub subop: u8,
    pub operand: u8,
}

impl CbFields {
    pub const fn split(opcode: u8) -> Self {
        CbFields {
            group: opcode >> 6,
            subop: (opcode >> 3) & 0x07,
            operand: opcode & 0x07,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CbInstruction {
    pub opcode: u8,
    pub op: CbOp,
    pub target: RegTarget,
}

impl CbInstruction {
    pub const fn decode(cb_opcode: u8) -> Self {
        let fields = CbFields::split(cb_opcode);
        let op = match fields.group {
            0 => CbOp::Shift(ShiftOp::from_bits(fields.subop)),
            1 => CbOp::Bit(fields.subop),
            2 => CbOp::Res(fields.subop),
            _ => CbOp::Set(fields.subop),
        };
        CbInstruction {
            opcode: cb_opcode,
            op,
            target: RegTarget::from_bits(fields.operand),
        }
    }

    /// 依規格表產生的 metadata，欄位格式與 Opcodes.json 的 cbprefixed 相同
    pub fn info(&self) -> OpcodeInfo {
        let mut operands = Vec::with_capacity(2);
        if let CbOp::Bit(bit) | CbOp::Res(bit) | CbOp::Set(bit) = self.op {
            operands.push(Operand {
                name: bit.to_string(),
                immediate: true,
            });
        }
        operands.push(Operand {
            name: if self.target.is_memory() {
                "HL".to_string()
            } else {
                self.target.name().to_string()
            },
            immediate: !self.target.is_memory(),
        });
        let [z, n, h, c] = self.op.flag_effects();
        OpcodeInfo {
            opcode: format!("0x{:02X}", self.opcode),
            mnemonic: self.op.mnemonic().to_string(),
            bytes: 2,
            operands,
            flags: FlagContract {
                z: z.symbol('Z').to_string(),
                n: n.symbol('N').to_string(),
                h: h.symbol('H').to_string(),
                c: c.symbol('C').to_string(),
            },
        }
    }
}

impl std::fmt::Display for CbInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.op {
            CbOp::Shift(op) => write!(f, "{} {}", op.mnemonic(), self.target),
            CbOp::Bit(bit) | CbOp::Res(bit) | CbOp::Set(bit) => {
                write!(f, "{} {},{}", self.op.mnemonic(), bit, self.target)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagEffect {
    /// 由結果或取樣位元計算
    Computed,
    Reset,
    Set,
    Unchanged,
}

impl FlagEffect {
    pub const fn symbol(self, name: char) -> char {
        match self {
            FlagEffect::Computed => name,
            FlagEffect::Reset => '0',
            FlagEffect::Set => '1',
            FlagEffect::Unchanged => '-',
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub name: String,
    #[serde(default)]
    pub immediate: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FlagContract {
    #[serde(rename = "Z")]
    pub z: String,
    #[serde(rename = "N")]
    pub n: String,
    #[serde(rename = "H")]
    pub h: String,
    #[serde(rename = "C")]
    pub c: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub opcode: String,
    pub mnemonic: String,
    pub bytes: u8,
    pub operands: Vec<Operand>,
    pub flags: FlagContract,
}

/// 全部 256 個 CB opcode 的 metadata
pub fn cb_opcode_table() -> Vec<OpcodeInfo> {
    (0..=0xFFu8).map(|op| CbInstruction::decode(op).info()).collect()
}

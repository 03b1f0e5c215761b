use std::path::Path;

use rust_gb_cb::core::cpu::instruction::cb_opcode_table;
use rust_gb_cb::core::utils::logger::{self, LoggerConfig};
use rust_gb_cb::{CbInstruction, Emulator, Error, Result, Snapshot};

const USAGE: &str = "用法:
  rust_gb_cb table                        輸出 256 個 CB opcode 的 metadata (JSON)
  rust_gb_cb disasm <hex>...              反組譯 CB opcode
  rust_gb_cb exec <state.json> <hex>...   以快照執行 CB opcode 並輸出結果快照";

fn parse_opcode(text: &str) -> Result<u8> {
    let mut digits = text.trim_start_matches("0x").trim_start_matches("0X");
    // 接受含前綴的寫法，例如 CB7C
    if digits.len() == 4 && digits.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("cb")) {
        digits = digits.get(2..).unwrap_or(digits);
    }
    u8::from_str_radix(digits, 16)
        .map_err(|_| Error::InvalidArgument(format!("`{text}` is not a hex byte")))
}

fn parse_opcodes(args: &[String]) -> Result<Vec<u8>> {
    args.iter().map(|a| parse_opcode(a)).collect()
}

fn run(args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("table") => {
            println!("{}", serde_json::to_string_pretty(&cb_opcode_table())?);
        }
        Some("disasm") => {
            for opcode in parse_opcodes(&args[1..])? {
                println!("CB {:02X}  {}", opcode, CbInstruction::decode(opcode));
            }
        }
        Some("exec") => {
            let path = args
                .get(1)
                .ok_or_else(|| Error::InvalidArgument("missing state file".to_string()))?;
            let snapshot = Snapshot::load(Path::new(path))?;
            let opcodes = parse_opcodes(&args[2..])?;
            let mut emu = Emulator::from_snapshot(&snapshot);
            emu.run(&opcodes)?;
            println!("{}", emu.snapshot().to_json()?);
            eprintln!("{}", emu.cpu.registers);
        }
        _ => return Err(Error::InvalidArgument(USAGE.to_string())),
    }
    Ok(())
}

fn main() {
    if let Err(err) = logger::init(&LoggerConfig::from_env()) {
        eprintln!("無法開啟 log 檔: {err}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(&args) {
        log::error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

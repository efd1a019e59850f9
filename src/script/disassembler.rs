//! Disassembles script bytes into mnemonic/hex token text.

use crate::script::op_codes::{self, OP_0, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4};
use crate::util::{ByteReader, Error, Result};

/// Disassembles script bytes into space-joined tokens, data pushes rendered
/// as hex.
///
/// # Errors
/// `Error::BadData` on a push running past the end of the script,
/// `Error::ScriptError` on a byte with no assigned mnemonic.
pub fn disassemble(script: &[u8]) -> Result<String> {
    let mut reader = ByteReader::new(script);
    let mut tokens: Vec<String> = vec![];
    while !reader.is_finished() {
        let op_code = reader.read_u8()?;
        match op_code {
            OP_0 => tokens.push("OP_0".to_string()),
            len @ 0x01..=0x4b => {
                tokens.push(hex::encode(reader.read_bytes(len as usize)?));
            }
            OP_PUSHDATA1 => {
                let len = reader.read_u8()?;
                tokens.push(hex::encode(reader.read_bytes(len as usize)?));
            }
            OP_PUSHDATA2 => {
                let len = reader.read_u16_le()?;
                tokens.push(hex::encode(reader.read_bytes(len as usize)?));
            }
            OP_PUSHDATA4 => {
                let len = reader.read_u32_le()?;
                tokens.push(hex::encode(reader.read_bytes(len as usize)?));
            }
            other => {
                let name = op_codes::name(other);
                if name == op_codes::INVALID_OPCODE_NAME {
                    return Err(Error::ScriptError(format!(
                        "Invalid opcode 0x{:02x} at offset {}",
                        other,
                        reader.offset() - 1
                    )));
                }
                tokens.push(name.to_string());
            }
        }
    }
    Ok(tokens.join(" "))
}

//! Script building, assembly to and from mnemonic text, and the BASM-lite
//! template language.

use crate::util::{ByteWriter, Result};

pub mod assembler;
pub mod basm;
pub mod disassembler;
pub mod op_codes;

pub use self::assembler::assemble;
pub use self::basm::{compile_basm, compile_basm_bytes};
pub use self::disassembler::disassemble;

/// Transaction script.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Script(pub Vec<u8>);

impl Script {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Script {
        Script(vec![])
    }

    /// Creates an empty script with reserved capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Script {
        Script(Vec::with_capacity(capacity))
    }

    /// Script length in bytes.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the script is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a single opcode byte.
    #[inline]
    pub fn append(&mut self, op_code: u8) {
        self.0.push(op_code);
    }

    /// Appends raw script bytes with no push header.
    #[inline]
    pub fn append_slice(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }

    /// Appends a data push with the minimal push header for its length.
    pub fn append_data(&mut self, data: &[u8]) {
        let mut writer = ByteWriter::with_capacity(push_data_header_size(data.len()) + data.len());
        write_push_data(&mut writer, data);
        self.0.extend_from_slice(&writer.into_bytes());
    }

    /// Lowercase hex rendering of the script bytes.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parses a script from lowercase hex.
    ///
    /// # Errors
    /// `Error::FromHexError` on malformed hex.
    pub fn from_hex(text: &str) -> Result<Script> {
        Ok(Script(hex::decode(text)?))
    }

    /// Mnemonic/hex token rendering of the script.
    ///
    /// # Errors
    /// `Error::ScriptError` on truncated pushes or unknown opcodes.
    pub fn to_asm(&self) -> Result<String> {
        disassemble(&self.0)
    }
}

/// Size of the minimal push header for a payload of the given length.
///
/// Boundaries: 0-75 bytes use a bare length opcode, 76-255 `OP_PUSHDATA1`,
/// 256-65535 `OP_PUSHDATA2`, larger `OP_PUSHDATA4`.
#[must_use]
#[inline]
pub fn push_data_header_size(len: usize) -> usize {
    if len < op_codes::OP_PUSHDATA1 as usize {
        1
    } else if len <= 0xff {
        2
    } else if len <= 0xffff {
        3
    } else {
        5
    }
}

/// Writes a minimal push header followed by the payload.
pub fn write_push_data(writer: &mut ByteWriter, data: &[u8]) {
    let len = data.len();
    if len < op_codes::OP_PUSHDATA1 as usize {
        writer.put_u8(len as u8);
    } else if len <= 0xff {
        writer.put_u8(op_codes::OP_PUSHDATA1);
        writer.put_u8(len as u8);
    } else if len <= 0xffff {
        writer.put_u8(op_codes::OP_PUSHDATA2);
        writer.put_u16_le(len as u16);
    } else {
        writer.put_u8(op_codes::OP_PUSHDATA4);
        writer.put_u32_le(len as u32);
    }
    writer.put_slice(data);
}

/// Returns the offset of the token after the one at `i`. A truncated
/// `OP_PUSHDATA*` header clamps to the script length; a bare push counts
/// its declared payload even past the end.
#[must_use]
pub fn next_op(i: usize, script: &[u8]) -> usize {
    if i >= script.len() {
        return script.len();
    }
    match script[i] {
        len @ 1..=75 => i + 1 + len as usize,
        op_codes::OP_PUSHDATA1 => {
            if i + 2 > script.len() {
                script.len()
            } else {
                i + 2 + script[i + 1] as usize
            }
        }
        op_codes::OP_PUSHDATA2 => {
            if i + 3 > script.len() {
                script.len()
            } else {
                i + 3 + u16::from_le_bytes([script[i + 1], script[i + 2]]) as usize
            }
        }
        op_codes::OP_PUSHDATA4 => {
            if i + 5 > script.len() {
                script.len()
            } else {
                i + 5
                    + u32::from_le_bytes([
                        script[i + 1],
                        script[i + 2],
                        script[i + 3],
                        script[i + 4],
                    ]) as usize
            }
        }
        _ => i + 1,
    }
}

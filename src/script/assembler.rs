//! Assembles whitespace-separated mnemonic/hex token text into script bytes.

use crate::script::op_codes::{OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4};
use crate::script::{op_codes, push_data_header_size, write_push_data};
use crate::util::{ByteWriter, Error, Result};

/// Assembles script text into bytes.
///
/// Each token is either an `OP_`-prefixed mnemonic or an even-length hex
/// literal that becomes a minimal data push. The pushdata mnemonics are not
/// directly assemblable; data is supplied as hex and the push header is
/// chosen from its length. Sizing runs before writing so the output buffer
/// is allocated once.
///
/// # Errors
/// `Error::ScriptError` for unknown or pushdata mnemonics,
/// `Error::FromHexError` for tokens that are not valid hex.
pub fn assemble(text: &str) -> Result<Vec<u8>> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let mut size = 0;
    for token in &tokens {
        if token.starts_with("OP_") {
            size += 1;
        } else {
            size += push_data_header_size(token.len() / 2) + token.len() / 2;
        }
    }

    let mut writer = ByteWriter::with_capacity(size);
    for token in &tokens {
        if token.starts_with("OP_") {
            let op_code = op_codes::from_name(token)
                .ok_or_else(|| Error::ScriptError(format!("Unknown opcode: {}", token)))?;
            if op_code == OP_PUSHDATA1 || op_code == OP_PUSHDATA2 || op_code == OP_PUSHDATA4 {
                return Err(Error::ScriptError(format!(
                    "{} cannot be assembled directly, supply the data as hex",
                    token
                )));
            }
            writer.put_u8(op_code);
        } else {
            let data = hex::decode(token)?;
            write_push_data(&mut writer, &data);
        }
    }
    Ok(writer.into_bytes())
}

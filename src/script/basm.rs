//! BASM-lite template compiler.
//!
//! A line-oriented mini-language for script templates. Each line is either a
//! bare `OP_` mnemonic or an angle-bracketed literal: `<0x...>` hex used
//! verbatim, `<"...">` a UTF-8 string, or `<n>` a decimal integer. Small
//! integers 0-16 compile to their constant opcodes; larger ones compile to a
//! varint-encoded data push.

use crate::script::assemble;
use crate::util::{var_int, Error, Result};

/// Compiles BASM-lite template text into assembler text.
///
/// # Errors
/// `Error::ScriptError` on a malformed line or literal,
/// `Error::ValueRange` on an integer above the safe ceiling.
pub fn compile_basm(text: &str) -> Result<String> {
    let mut tokens: Vec<String> = vec![];
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(literal) = line.strip_prefix('<').and_then(|l| l.strip_suffix('>')) {
            tokens.push(compile_literal(literal)?);
        } else if line.starts_with("OP_") {
            tokens.push(line.to_string());
        } else {
            return Err(Error::ScriptError(format!("Unrecognized line: {}", line)));
        }
    }
    Ok(tokens.join(" "))
}

/// Compiles BASM-lite template text straight to script bytes.
///
/// # Errors
/// As [`compile_basm`], plus assembler errors.
pub fn compile_basm_bytes(text: &str) -> Result<Vec<u8>> {
    assemble(&compile_basm(text)?)
}

fn compile_literal(literal: &str) -> Result<String> {
    if let Some(hex_text) = literal.strip_prefix("0x") {
        if hex_text.is_empty() || hex_text.len() % 2 != 0 || !hex_text.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::ScriptError(format!("Invalid hex literal: {}", literal)));
        }
        return Ok(hex_text.to_lowercase());
    }
    if let Some(quoted) = literal.strip_prefix('"').and_then(|l| l.strip_suffix('"')) {
        return Ok(hex::encode(quoted.as_bytes()));
    }
    let n: u64 = literal
        .parse()
        .map_err(|_| Error::ScriptError(format!("Invalid literal: <{}>", literal)))?;
    if n == 0 {
        return Ok("OP_0".to_string());
    }
    if n <= 16 {
        return Ok(format!("OP_{}", n));
    }
    let mut bytes = Vec::with_capacity(var_int::size(n));
    var_int::write(n, &mut bytes)?;
    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::disassemble;
    use pretty_assertions::assert_eq;

    #[test]
    fn literal_forms() {
        let text = "<0xdeadbeef>\n<\"hi\">\n<3>";
        assert_eq!(compile_basm(text).unwrap(), "deadbeef 6869 OP_3");
        assert_eq!(hex::encode(compile_basm_bytes(text).unwrap()), "04deadbeef02686953");
    }

    #[test]
    fn round_trip_through_disassembler() {
        let bytes = compile_basm_bytes("<0xdeadbeef>\n<\"hi\">\n<3>").unwrap();
        assert_eq!(disassemble(&bytes).unwrap(), "deadbeef 6869 OP_3");
    }

    #[test]
    fn integer_literals() {
        assert_eq!(compile_basm("<0>").unwrap(), "OP_0");
        assert_eq!(compile_basm("<16>").unwrap(), "OP_16");
        assert_eq!(compile_basm("<17>").unwrap(), "11");
        assert_eq!(compile_basm("<1000>").unwrap(), "fde803");
    }

    #[test]
    fn mnemonics_and_blank_lines() {
        let text = "OP_DUP\n\n  OP_HASH160  \n<0x1122334455667788990011223344556677889900>\nOP_EQUALVERIFY\nOP_CHECKSIG";
        let bytes = compile_basm_bytes(text).unwrap();
        assert_eq!(
            hex::encode(bytes),
            "76a914112233445566778899001122334455667788990088ac"
        );
    }

    #[test]
    fn rejects_malformed() {
        assert!(compile_basm("DUP").is_err());
        assert!(compile_basm("<0xabc>").is_err());
        assert!(compile_basm("<maybe>").is_err());
        assert!(compile_basm("<-1>").is_err());
    }
}

//! Transaction output.

use crate::script::Script;
use crate::util::{var_int, ByteReader, ByteWriter, Error, Result};

/// Transaction output.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    /// Amount in the smallest unit.
    pub value: u64,
    /// Locking script.
    pub script: Script,
}

impl TxOut {
    /// Serialized size.
    #[must_use]
    pub fn size(&self) -> usize {
        8 + var_int::var_slice_size(self.script.len())
    }

    /// Writes the output in wire order.
    ///
    /// # Errors
    /// `Error::ValueRange` on an oversized script length.
    pub fn write(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_u64_le(self.value);
        writer.put_var_slice(&self.script.0)?;
        Ok(())
    }

    /// Reads an output in wire order, rejecting values that need more than
    /// 53 bits of precision.
    ///
    /// # Errors
    /// `Error::BadData` on a truncated buffer, `Error::ValueRange` on an
    /// unrepresentable value.
    pub fn read(reader: &mut ByteReader) -> Result<TxOut> {
        let value = reader.read_u64_le()?;
        if value > var_int::MAX_SAFE_VALUE {
            return Err(Error::ValueRange(format!("Output value too large: {}", value)));
        }
        let script = Script(reader.read_var_slice()?);
        Ok(TxOut { value, script })
    }
}

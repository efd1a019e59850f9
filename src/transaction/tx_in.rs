//! Transaction input.

use crate::script::Script;
use crate::util::{var_int, ByteReader, ByteWriter, Hash256, Result};

/// Transaction input.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
    /// Hash of the spent transaction, in internal byte order.
    pub prev_hash: Hash256,
    /// Index of the spent output.
    pub prev_index: u32,
    /// Unlocking script.
    pub script: Script,
    /// Sequence number.
    pub sequence: u32,
    /// Witness stack carried by embedded coinbase transactions, if any.
    pub witness: Option<Vec<Vec<u8>>>,
}

impl TxIn {
    /// Serialized size, excluding witness data.
    #[must_use]
    pub fn size(&self) -> usize {
        40 + var_int::var_slice_size(self.script.len())
    }

    /// Returns whether this input carries a non-empty witness stack.
    #[must_use]
    pub fn has_witness(&self) -> bool {
        self.witness.as_ref().is_some_and(|w| !w.is_empty())
    }

    /// Writes the input in wire order, without its witness stack.
    ///
    /// # Errors
    /// `Error::ValueRange` on an oversized script length.
    pub fn write(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_slice(&self.prev_hash.0);
        writer.put_u32_le(self.prev_index);
        writer.put_var_slice(&self.script.0)?;
        writer.put_u32_le(self.sequence);
        Ok(())
    }

    /// Reads an input in wire order, without its witness stack.
    ///
    /// # Errors
    /// `Error::BadData` on a truncated buffer.
    pub fn read(reader: &mut ByteReader) -> Result<TxIn> {
        let mut prev_hash = Hash256([0; 32]);
        prev_hash.0.copy_from_slice(&reader.read_bytes(32)?);
        let prev_index = reader.read_u32_le()?;
        let script = Script(reader.read_var_slice()?);
        let sequence = reader.read_u32_le()?;
        Ok(TxIn {
            prev_hash,
            prev_index,
            script,
            sequence,
            witness: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn write_read() {
        let tx_in = TxIn {
            prev_hash: Hash256([7; 32]),
            prev_index: 3,
            script: Script(vec![0x51, 0x52]),
            sequence: 0xfffffffe,
            witness: None,
        };
        assert_eq!(tx_in.size(), 43);
        let mut writer = ByteWriter::new();
        tx_in.write(&mut writer).unwrap();
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), tx_in.size());
        let parsed = TxIn::read(&mut ByteReader::new(&bytes)).unwrap();
        assert_eq!(parsed, tx_in);
    }

    #[test]
    fn witness_detection() {
        let mut tx_in = TxIn::default();
        assert!(!tx_in.has_witness());
        tx_in.witness = Some(vec![]);
        assert!(!tx_in.has_witness());
        tx_in.witness = Some(vec![vec![0xaa]]);
        assert!(tx_in.has_witness());
    }

    #[test]
    fn truncated() {
        assert!(TxIn::read(&mut ByteReader::new(&[0; 20])).is_err());
    }
}

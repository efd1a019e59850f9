//! Transaction and its wire codec.

use crate::address::address_to_lock_script;
use crate::transaction::{TxIn, TxOut, ADVANCED_TRANSACTION_FLAG, ADVANCED_TRANSACTION_MARKER};
use crate::util::{sha256d, var_int, ByteReader, ByteWriter, Error, Hash256, Result};

/// A spendable output found by scanning a transaction for an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utxo {
    /// Transaction id in display order.
    pub txid: String,
    /// Output index.
    pub vout: u32,
    /// Output value.
    pub value: u64,
}

/// Dogecoin transaction.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Tx {
    /// Transaction version.
    pub version: i32,
    /// Inputs spent.
    pub inputs: Vec<TxIn>,
    /// Outputs created.
    pub outputs: Vec<TxOut>,
    /// Block height or timestamp before which the transaction is invalid.
    pub lock_time: u32,
}

impl Tx {
    /// Builds an unsigned version-2 skeleton, clearing any input scripts.
    #[must_use]
    pub fn from_partial(inputs: Vec<TxIn>, outputs: Vec<TxOut>, lock_time: u32) -> Tx {
        let inputs = inputs
            .into_iter()
            .map(|mut input| {
                input.script.0.clear();
                input
            })
            .collect();
        Tx {
            version: 2,
            inputs,
            outputs,
            lock_time,
        }
    }

    /// Returns whether the transaction has neither inputs nor outputs.
    #[must_use]
    pub fn is_dummy(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }

    /// Returns whether any input carries a non-empty witness stack.
    #[must_use]
    pub fn has_witness(&self) -> bool {
        self.inputs.iter().any(TxIn::has_witness)
    }

    /// Appends an input.
    pub fn add_input(&mut self, input: TxIn) -> &mut Self {
        self.inputs.push(input);
        self
    }

    /// Appends an output.
    pub fn add_output(&mut self, output: TxOut) -> &mut Self {
        self.outputs.push(output);
        self
    }

    /// Serialized size in bytes, optionally counting witness data.
    #[must_use]
    pub fn byte_length(&self, include_witness: bool) -> usize {
        let has_witness = include_witness && self.has_witness();
        let base = if has_witness { 10 } else { 8 };
        let header = base
            + var_int::size(self.inputs.len() as u64)
            + var_int::size(self.outputs.len() as u64);
        let inputs: usize = self.inputs.iter().map(TxIn::size).sum();
        let outputs: usize = self.outputs.iter().map(TxOut::size).sum();
        let witnesses: usize = if has_witness {
            self.inputs
                .iter()
                .map(|input| var_int::vector_size(input.witness.as_deref().unwrap_or(&[])))
                .sum()
        } else {
            0
        };
        header + inputs + outputs + witnesses
    }

    /// Weight in weight units. Kept arithmetically correct for embedded
    /// coinbase transactions even though the chain has no segwit discount.
    #[must_use]
    pub fn weight(&self) -> usize {
        self.byte_length(false) * 3 + self.byte_length(true)
    }

    /// Virtual size in bytes, rounded up.
    #[must_use]
    pub fn virtual_size(&self) -> usize {
        self.weight().div_ceil(4)
    }

    fn write_to(
        &self,
        writer: &mut ByteWriter,
        allow_witness: bool,
        sighash_type: Option<u32>,
    ) -> Result<()> {
        let has_witness = allow_witness && self.has_witness();
        if has_witness {
            writer.put_u8(ADVANCED_TRANSACTION_MARKER);
            writer.put_u8(ADVANCED_TRANSACTION_FLAG);
        }
        writer.put_i32_le(self.version);
        writer.put_var_int(self.inputs.len() as u64)?;
        for input in &self.inputs {
            input.write(writer)?;
        }
        writer.put_var_int(self.outputs.len() as u64)?;
        for output in &self.outputs {
            output.write(writer)?;
        }
        if has_witness {
            for input in &self.inputs {
                writer.put_vector(input.witness.as_deref().unwrap_or(&[]))?;
            }
        }
        writer.put_u32_le(self.lock_time);
        if let Some(sighash_type) = sighash_type {
            writer.put_u32_le(sighash_type);
        }
        Ok(())
    }

    /// Serializes the transaction without witness data.
    ///
    /// # Errors
    /// `Error::ValueRange` on oversized counts or script lengths.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = ByteWriter::with_capacity(self.byte_length(false));
        self.write_to(&mut writer, false, None)?;
        Ok(writer.into_bytes())
    }

    /// Serializes the transaction with witness data when any input carries it.
    ///
    /// # Errors
    /// `Error::ValueRange` on oversized counts or script lengths.
    pub fn to_wire_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = ByteWriter::with_capacity(self.byte_length(true));
        self.write_to(&mut writer, true, None)?;
        Ok(writer.into_bytes())
    }

    /// Serializes the non-witness form plus a trailing 32-bit sighash type,
    /// producing a sighash preimage.
    ///
    /// # Errors
    /// `Error::ValueRange` on oversized counts or script lengths.
    pub fn to_sighash_bytes(&self, sighash_type: u32) -> Result<Vec<u8>> {
        let mut writer = ByteWriter::with_capacity(self.byte_length(false) + 4);
        self.write_to(&mut writer, false, Some(sighash_type))?;
        Ok(writer.into_bytes())
    }

    /// Lowercase hex of the non-witness serialization.
    ///
    /// # Errors
    /// `Error::ValueRange` on oversized counts or script lengths.
    pub fn to_hex(&self) -> Result<String> {
        Ok(hex::encode(self.to_bytes()?))
    }

    /// Transaction id: double-SHA256 of the non-witness serialization, in
    /// internal byte order. Display via [`Hash256::encode`].
    ///
    /// # Errors
    /// Serialization errors.
    pub fn txid(&self) -> Result<Hash256> {
        Ok(sha256d(&self.to_bytes()?))
    }

    /// Parses a transaction from hex.
    ///
    /// # Errors
    /// Hex and wire-format errors.
    pub fn from_hex(text: &str) -> Result<Tx> {
        Tx::from_bytes(&hex::decode(text)?)
    }

    /// Parses a transaction from bytes. Trailing bytes are ignored, matching
    /// the sighash-preimage form which carries a trailing type field.
    ///
    /// # Errors
    /// Wire-format errors.
    pub fn from_bytes(bytes: &[u8]) -> Result<Tx> {
        Tx::from_reader(&mut ByteReader::new(bytes))
    }

    /// Parses a transaction from a reader, leaving the cursor after it.
    ///
    /// The version is read first, then a two-byte lookahead decides whether
    /// a witness marker/flag pair follows. A flagged transaction where no
    /// input ends up with witness data is rejected.
    ///
    /// # Errors
    /// `Error::BadData` on truncation or unnecessary witness data,
    /// `Error::ValueRange` on an unrepresentable output value.
    pub fn from_reader(reader: &mut ByteReader) -> Result<Tx> {
        let version = reader.read_i32_le()?;
        let mut has_witness = false;
        if let Ok([marker, flag]) = reader.peek_2() {
            if marker == ADVANCED_TRANSACTION_MARKER && flag == ADVANCED_TRANSACTION_FLAG {
                reader.read_u8()?;
                reader.read_u8()?;
                has_witness = true;
            }
        }

        // counts come off the wire; cap the reservation by the bytes left
        let input_count = reader.read_var_int()?;
        let mut inputs = Vec::with_capacity(input_count.min(reader.remaining() as u64) as usize);
        for _ in 0..input_count {
            inputs.push(TxIn::read(reader)?);
        }
        let output_count = reader.read_var_int()?;
        let mut outputs = Vec::with_capacity(output_count.min(reader.remaining() as u64) as usize);
        for _ in 0..output_count {
            outputs.push(TxOut::read(reader)?);
        }
        if has_witness {
            for input in &mut inputs {
                input.witness = Some(reader.read_vector()?);
            }
        }
        let lock_time = reader.read_u32_le()?;

        let tx = Tx {
            version,
            inputs,
            outputs,
            lock_time,
        };
        if has_witness && !tx.has_witness() {
            return Err(Error::BadData(
                "transaction has unnecessary witness data".to_string(),
            ));
        }
        Ok(tx)
    }

    /// Output indexes whose locking script pays the address.
    ///
    /// # Errors
    /// Address decoding errors.
    pub fn vouts_for_address(&self, address: &str) -> Result<Vec<u32>> {
        let script = address_to_lock_script(address)?;
        Ok(self
            .outputs
            .iter()
            .enumerate()
            .filter(|(_, output)| output.script == script)
            .map(|(index, _)| index as u32)
            .collect())
    }

    /// Spendable outputs paying the address, as (txid, vout, value) records.
    ///
    /// # Errors
    /// Address decoding or serialization errors.
    pub fn utxos_for_address(&self, address: &str) -> Result<Vec<Utxo>> {
        let vouts = self.vouts_for_address(address)?;
        if vouts.is_empty() {
            return Ok(vec![]);
        }
        let txid = self.txid()?.encode();
        Ok(vouts
            .into_iter()
            .map(|vout| Utxo {
                txid: txid.clone(),
                vout,
                value: self.outputs[vout as usize].value,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WIRE_TX: &str = "0200000001df486878f846bd7b52721f5731a2755a3894bdf8675cf1ca16b70d5af7c882a8000000006a47111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111111121222222222222222222222222222222222222222222222222222222222222222222ffffffff0215cd5b07000000001976a914112233445566778899001122334455667788990088ac80f0fa02000000001976a914917444c6ddd7d5bf07d7d3da2ecc1379014539a088ac00000000";
    const WIRE_TXID: &str = "02ff48321b5f95a306bbf354d5a51bd124028dbcb8c8f2b006e199d70d17677b";
    const WITNESS_TX: &str = "02000000000101df486878f846bd7b52721f5731a2755a3894bdf8675cf1ca16b70d5af7c882a80000000000ffffffff01e8030000000000001976a914112233445566778899001122334455667788990088ac0102aabb00000000";
    const BAD_WITNESS_TX: &str = "02000000000101df486878f846bd7b52721f5731a2755a3894bdf8675cf1ca16b70d5af7c882a80000000000ffffffff01e8030000000000001976a914112233445566778899001122334455667788990088ac0000000000";

    #[test]
    fn wire_round_trip() {
        let tx = Tx::from_hex(WIRE_TX).unwrap();
        assert_eq!(tx.version, 2);
        assert_eq!(tx.lock_time, 0);
        assert_eq!(tx.inputs.len(), 1);
        assert_eq!(
            tx.inputs[0].prev_hash.encode(),
            "a882c8f75a0db716caf15c67f8bd94385a75a231571f72527bbd46f8786848df"
        );
        assert_eq!(tx.inputs[0].prev_index, 0);
        assert_eq!(tx.inputs[0].script.len(), 106);
        assert_eq!(tx.inputs[0].sequence, 0xffffffff);
        assert_eq!(tx.outputs.len(), 2);
        assert_eq!(tx.outputs[0].value, 123456789);
        assert_eq!(tx.outputs[1].value, 50000000);

        assert_eq!(tx.to_hex().unwrap(), WIRE_TX);
        assert_eq!(tx.txid().unwrap().encode(), WIRE_TXID);
        assert_eq!(Tx::from_hex(&tx.to_hex().unwrap()).unwrap(), tx);
    }

    #[test]
    fn sizes_without_witness() {
        let tx = Tx::from_hex(WIRE_TX).unwrap();
        let len = WIRE_TX.len() / 2;
        assert_eq!(tx.byte_length(false), len);
        assert_eq!(tx.byte_length(true), len);
        assert_eq!(tx.weight(), len * 4);
        assert_eq!(tx.virtual_size(), len);
    }

    #[test]
    fn witness_parse() {
        let tx = Tx::from_hex(WITNESS_TX).unwrap();
        assert_eq!(tx.inputs.len(), 1);
        assert_eq!(tx.inputs[0].witness, Some(vec![vec![0xaa, 0xbb]]));
        assert_eq!(tx.outputs[0].value, 1000);
        assert!(tx.has_witness());

        let len = WITNESS_TX.len() / 2;
        assert_eq!(tx.byte_length(true), len);
        assert_eq!(tx.byte_length(false), len - 6);
        assert_eq!(tx.weight(), (len - 6) * 3 + len);

        // witness-inclusive serialization leads with the marker/flag pair
        let wire = tx.to_wire_bytes().unwrap();
        assert_eq!(wire.len(), len);
        assert_eq!(&wire[..2], &[ADVANCED_TRANSACTION_MARKER, ADVANCED_TRANSACTION_FLAG]);

        // the default serialization drops witness data
        assert_eq!(tx.to_bytes().unwrap().len(), len - 6);
    }

    #[test]
    fn unnecessary_witness_rejected() {
        match Tx::from_hex(BAD_WITNESS_TX) {
            Err(Error::BadData(message)) => {
                assert_eq!(message, "transaction has unnecessary witness data");
            }
            other => panic!("expected BadData, got {:?}", other),
        }
    }

    #[test]
    fn from_partial_clears_scripts() {
        let parsed = Tx::from_hex(WIRE_TX).unwrap();
        let tx = Tx::from_partial(parsed.inputs.clone(), parsed.outputs.clone(), 0);
        assert_eq!(tx.version, 2);
        assert!(tx.inputs[0].script.is_empty());
        assert_eq!(tx.inputs[0].prev_hash, parsed.inputs[0].prev_hash);
        assert_eq!(tx.outputs, parsed.outputs);
        assert!(!tx.is_dummy());
        assert!(Tx::default().is_dummy());
    }

    #[test]
    fn utxo_extraction() {
        let tx = Tx::from_hex(WIRE_TX).unwrap();
        let utxos = tx.utxos_for_address("D6hgzo5utJKkgSzY3Qcfs5rmQBUKeLufms").unwrap();
        assert_eq!(
            utxos,
            vec![Utxo {
                txid: WIRE_TXID.to_string(),
                vout: 0,
                value: 123456789,
            }]
        );
        let utxos = tx.utxos_for_address("DJQBoZYbxu63ZmNZTgnMRu7xQ3621LCEUy").unwrap();
        assert_eq!(utxos[0].vout, 1);
        assert_eq!(utxos[0].value, 50000000);
        // P2SH address paying nowhere in this transaction
        assert!(tx
            .utxos_for_address("A7BFc5iVwq7ifB3rGp3VA9qBb8r5JmxHuq")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn huge_counts_fail_without_allocating() {
        // version then an input count of 2^53 - 1 and nothing behind it
        let mut bytes = hex::decode("02000000ff").unwrap();
        bytes.extend_from_slice(&9_007_199_254_740_991u64.to_le_bytes());
        assert!(matches!(Tx::from_bytes(&bytes), Err(Error::BadData(_))));

        // same for the output count
        let mut bytes = hex::decode("0200000000ff").unwrap();
        bytes.extend_from_slice(&9_007_199_254_740_991u64.to_le_bytes());
        assert!(Tx::from_bytes(&bytes).is_err());
    }

    #[test]
    fn truncated_buffers() {
        let bytes = hex::decode(WIRE_TX).unwrap();
        for cut in [3, 10, 45, bytes.len() - 1] {
            assert!(Tx::from_bytes(&bytes[..cut]).is_err(), "cut at {}", cut);
        }
    }
}

//! Capability contract for objects stored in a flat file

use super::encoding::CodecError;

/// An object that can be snapshotted into a flat file
///
/// The framer owns only the header and checksum around the payload bytes;
/// everything inside them is produced and consumed by the implementor.
pub trait FlatPayload {
    /// Append the serialized payload to `buf`
    fn serialize_into(&self, buf: &mut Vec<u8>) -> Result<(), CodecError>;

    /// Replace the contents with the payload decoded from `bytes`
    fn deserialize_from(&mut self, bytes: &[u8]) -> Result<(), CodecError>;

    /// Reset to the empty state
    fn clear(&mut self);

    /// One-line summary for logs
    fn describe(&self) -> String;

    /// Name of the file this payload maps to, for logs
    fn filename(&self) -> &str;

    /// Post-load cleanup, run only after a successful non-dry read
    fn maintain(&mut self);
}

/// Payload kept as opaque bytes
///
/// Lets tooling verify a file's framing without knowing the payload type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPayload {
    filename: String,
    bytes: Vec<u8>,
}

impl RawPayload {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            bytes: Vec::new(),
        }
    }

    pub fn with_bytes(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl FlatPayload for RawPayload {
    fn serialize_into(&self, buf: &mut Vec<u8>) -> Result<(), CodecError> {
        buf.extend_from_slice(&self.bytes);
        Ok(())
    }

    fn deserialize_from(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.bytes = bytes.to_vec();
        Ok(())
    }

    fn clear(&mut self) {
        self.bytes.clear();
    }

    fn describe(&self) -> String {
        format!("Raw payload: {} bytes", self.bytes.len())
    }

    fn filename(&self) -> &str {
        &self.filename
    }

    fn maintain(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_payload_roundtrip() {
        let payload = RawPayload::with_bytes("raw.dat", vec![1, 2, 3]);
        let mut buf = Vec::new();
        payload.serialize_into(&mut buf).unwrap();

        let mut loaded = RawPayload::new("raw.dat");
        loaded.deserialize_from(&buf).unwrap();
        assert_eq!(loaded, payload);
        assert_eq!(loaded.describe(), "Raw payload: 3 bytes");

        loaded.clear();
        assert!(loaded.bytes().is_empty());
    }
}

use std::fmt;

use super::HashAlgorithm;

/// Raw digest bytes as they appear in a reduced hash tree.
///
/// Equality and containment are byte-exact. The derived `Ord` is the
/// byte-lexicographic order over unsigned bytes with the shorter value
/// ordered first on a length mismatch, which is exactly the concatenation
/// order the hash-tree reconstruction requires.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DigestValue(Box<[u8]>);

impl DigestValue {
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into().into_boxed_slice())
    }

    /// Digest `data` with `algo` and wrap the result.
    #[must_use]
    pub fn of(algo: HashAlgorithm, data: &[u8]) -> Self {
        Self::new(algo.compute(data))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for DigestValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = &self.0[..self.0.len().min(8)];
        write!(f, "DigestValue({}…, {} bytes)", hex::encode(head), self.0.len())
    }
}

impl fmt::Display for DigestValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<Vec<u8>> for DigestValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for DigestValue {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_unsigned_byte_lexicographic() {
        let a = DigestValue::new(vec![0x00, 0xff]);
        let b = DigestValue::new(vec![0x01, 0x00]);
        let c = DigestValue::new(vec![0x80]);
        assert!(a < b);
        assert!(b < c); // 0x01 < 0x80 on the first byte
    }

    #[test]
    fn shorter_prefix_orders_first() {
        let short = DigestValue::new(vec![0xab]);
        let long = DigestValue::new(vec![0xab, 0x00]);
        assert!(short < long);
    }

    #[test]
    fn hex_rendering() {
        let d = DigestValue::new(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(d.to_hex(), "deadbeef");
        assert_eq!(format!("{d}"), "deadbeef");
    }

    #[test]
    fn equality_is_byte_exact() {
        let a = DigestValue::new(vec![1, 2, 3]);
        let b = DigestValue::new(vec![1, 2, 3]);
        let c = DigestValue::new(vec![1, 2, 4]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

use crate::error::HexGridError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Key format version for encoding/decoding.
pub const KEY_VERSION: u8 = 1;

/// Radii are stored in thousandths of a unit (millimetres for metre grids).
const RADIUS_SCALE: f64 = 1000.0;

const ENCODED_LEN: usize = 18;

/// Composite feature key: the radius of the size group plus the local index.
///
/// Local identifiers restart at zero in every size group, so only the pair is
/// unique across a whole batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexKey {
    pub radius: f64,
    pub local_id: u64,
}

impl HexKey {
    pub fn new(radius: f64, local_id: u64) -> Self {
        Self { radius, local_id }
    }

    /// Encodes the key as a URL-safe Base64 string.
    ///
    /// # Binary Format
    ///
    /// | Offset | Size | Field    | Description                                  |
    /// |--------|------|----------|----------------------------------------------|
    /// | 0      | 1    | Version  | Key format version (currently 1)             |
    /// | 1      | 8    | Radius   | Radius scaled by 1000, `u64` big-endian      |
    /// | 9      | 8    | Local id | Index within the size group, `u64` big-endian|
    /// | 17     | 1    | Checksum | Wrapping sum of bytes 0-16                   |
    ///
    /// # Example
    /// ```
    /// use hexgrids_rs::HexKey;
    ///
    /// # fn main() -> Result<(), hexgrids_rs::HexGridError> {
    /// let key = HexKey::new(50.0, 12);
    /// let decoded = HexKey::decode(&key.encode())?;
    /// assert_eq!(decoded, key);
    /// # Ok(())
    /// # }
    /// ```
    pub fn encode(&self) -> String {
        let radius_int = (self.radius * RADIUS_SCALE).round() as u64;

        let mut binary_data = Vec::with_capacity(ENCODED_LEN);
        binary_data.push(KEY_VERSION);
        binary_data.extend_from_slice(&radius_int.to_be_bytes());
        binary_data.extend_from_slice(&self.local_id.to_be_bytes());

        let checksum: u8 = binary_data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
        binary_data.push(checksum);

        URL_SAFE_NO_PAD.encode(&binary_data)
    }

    /// Decodes a key produced by [`HexKey::encode`].
    pub fn decode(key: &str) -> Result<Self, HexGridError> {
        let binary_data = URL_SAFE_NO_PAD
            .decode(key)
            .map_err(|_| HexGridError::Base64DecodeError)?;

        if binary_data.len() != ENCODED_LEN {
            return Err(HexGridError::InvalidIdentifierLength);
        }

        let (data, checksum_bytes) = binary_data.split_at(ENCODED_LEN - 1);
        let calculated: u8 = data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
        if calculated != checksum_bytes[0] {
            return Err(HexGridError::InvalidChecksum);
        }

        let version = data[0];
        if version != KEY_VERSION {
            return Err(HexGridError::UnsupportedVersion(version));
        }

        let radius_bytes: [u8; 8] = data[1..9]
            .try_into()
            .map_err(|_| HexGridError::InvalidIdentifierLength)?;
        let id_bytes: [u8; 8] = data[9..17]
            .try_into()
            .map_err(|_| HexGridError::InvalidIdentifierLength)?;

        Ok(Self {
            radius: u64::from_be_bytes(radius_bytes) as f64 / RADIUS_SCALE,
            local_id: u64::from_be_bytes(id_bytes),
        })
    }
}

impl std::fmt::Display for HexKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.radius, self.local_id)
    }
}

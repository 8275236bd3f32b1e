use crate::error::TypesError;
use std::fmt;
use std::str::FromStr;

/// 20-byte account identifier of a member, the chairperson, the escrow
/// account or a proposal recipient.
///
/// Display format: Bech32m with the "madao" human-readable prefix.
/// Hex (`0x…`) is accepted on input and produced by `{:x}`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    pub const ZERO: Self = Self([0u8; 20]);
    pub const LEN: usize = 20;

    /// Bech32m human-readable prefix
    pub const BECH32_HRP: &'static str = "madao";

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Create from a byte slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, TypesError> {
        let bytes: [u8; 20] = slice
            .try_into()
            .map_err(|_| TypesError::InvalidAddressLength(slice.len()))?;
        Ok(Self(bytes))
    }

    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }

    /// Convert to hex string without 0x prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    fn bech32_prefix() -> String {
        format!("{}1", Self::BECH32_HRP)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hrp = bech32::Hrp::parse_unchecked(Self::BECH32_HRP);
        match bech32::encode::<bech32::Bech32m>(hrp, &self.0) {
            Ok(encoded) => write!(f, "{}", encoded),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", hex::encode(self.0))
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with(&Self::bech32_prefix()) {
            let (hrp, data) =
                bech32::decode(s).map_err(|e| TypesError::Bech32Error(e.to_string()))?;

            let expected_hrp = bech32::Hrp::parse_unchecked(Self::BECH32_HRP);
            if hrp != expected_hrp {
                return Err(TypesError::InvalidAddressFormat(format!(
                    "Invalid HRP: expected '{}', got '{}'",
                    Self::BECH32_HRP,
                    hrp
                )));
            }

            Self::from_slice(&data)
        } else if let Some(stripped) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            let bytes = hex::decode(stripped)?;
            Self::from_slice(&bytes)
        } else {
            Err(TypesError::InvalidAddressFormat(s.to_string()))
        }
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_zero() {
        assert_eq!(Address::ZERO.as_bytes(), &[0u8; 20]);
        assert!(Address::ZERO.is_zero());
        assert!(!Address::from_bytes([1u8; 20]).is_zero());
    }

    #[test]
    fn test_address_from_slice() {
        let addr = Address::from_slice(&[9u8; 20]).unwrap();
        assert_eq!(addr.as_bytes(), &[9u8; 20]);

        assert_eq!(
            Address::from_slice(&[9u8; 19]),
            Err(TypesError::InvalidAddressLength(19))
        );
    }

    #[test]
    fn test_address_bech32m_roundtrip() {
        let bytes: [u8; 20] = std::array::from_fn(|i| i as u8);
        let addr = Address::from_bytes(bytes);

        let encoded = addr.to_string();
        assert!(encoded.starts_with("madao1"));

        let decoded: Address = encoded.parse().unwrap();
        assert_eq!(addr, decoded);
    }

    #[test]
    fn test_address_hex_parse() {
        let addr = Address::from_bytes([0xabu8; 20]);

        let hex = format!("{:x}", addr);
        assert_eq!(hex, format!("0x{}", addr.to_hex()));
        let parsed: Address = hex.parse().unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn test_address_from_str_invalid() {
        assert!(Address::from_str("invalid").is_err());
        assert!(Address::from_str("madao1qqqq").is_err());
        assert!(matches!(
            Address::from_str("0x1234"),
            Err(TypesError::InvalidAddressLength(2))
        ));
        assert!(matches!(
            Address::from_str("0xzz"),
            Err(TypesError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_address_ordering() {
        let addr1 = Address::from_bytes([0u8; 20]);
        let addr2 = Address::from_bytes([1u8; 20]);
        assert!(addr1 < addr2);
    }
}

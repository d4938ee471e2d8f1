//! Size unit multipliers (decimal and binary).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const K: u64 = 1000;
const KI: u64 = 1024;

/// Multiplier applied to a raw size to get a byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u64)]
pub enum BinaryUnit {
    #[default]
    #[serde(rename = "B")]
    Byte = 1,

    KB = K,
    MB = K * K,
    GB = K * K * K,
    TB = K * K * K * K,
    PB = K * K * K * K * K,

    KiB = KI,
    MiB = KI * KI,
    GiB = KI * KI * KI,
    TiB = KI * KI * KI * KI,
    PiB = KI * KI * KI * KI * KI,
}

impl BinaryUnit {
    /// Number of bytes in one unit.
    pub const fn bytes(self) -> u64 {
        self as u64
    }

    /// `size` units in bytes, saturating at `u64::MAX`.
    pub const fn of(self, size: u64) -> u64 {
        size.saturating_mul(self.bytes())
    }

    pub const fn name(self) -> &'static str {
        match self {
            BinaryUnit::Byte => "B",
            BinaryUnit::KB => "KB",
            BinaryUnit::MB => "MB",
            BinaryUnit::GB => "GB",
            BinaryUnit::TB => "TB",
            BinaryUnit::PB => "PB",
            BinaryUnit::KiB => "KiB",
            BinaryUnit::MiB => "MiB",
            BinaryUnit::GiB => "GiB",
            BinaryUnit::TiB => "TiB",
            BinaryUnit::PiB => "PiB",
        }
    }
}

impl fmt::Display for BinaryUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unknown unit name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown size unit: {0:?}")]
pub struct ParseUnitError(pub String);

impl FromStr for BinaryUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s {
            "B" | "Byte" => BinaryUnit::Byte,
            "KB" => BinaryUnit::KB,
            "MB" => BinaryUnit::MB,
            "GB" => BinaryUnit::GB,
            "TB" => BinaryUnit::TB,
            "PB" => BinaryUnit::PB,
            "KiB" => BinaryUnit::KiB,
            "MiB" => BinaryUnit::MiB,
            "GiB" => BinaryUnit::GiB,
            "TiB" => BinaryUnit::TiB,
            "PiB" => BinaryUnit::PiB,
            other => return Err(ParseUnitError(other.to_string())),
        };
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers() {
        assert_eq!(BinaryUnit::Byte.bytes(), 1);
        assert_eq!(BinaryUnit::KB.bytes(), 1_000);
        assert_eq!(BinaryUnit::MB.bytes(), 1_000_000);
        assert_eq!(BinaryUnit::PB.bytes(), 1_000_000_000_000_000);
        assert_eq!(BinaryUnit::KiB.bytes(), 1024);
        assert_eq!(BinaryUnit::MiB.bytes(), 1024 * 1024);
        assert_eq!(BinaryUnit::PiB.bytes(), 1u64 << 50);
    }

    #[test]
    fn of_saturates() {
        assert_eq!(BinaryUnit::KiB.of(3), 3072);
        assert_eq!(BinaryUnit::PiB.of(u64::MAX), u64::MAX);
    }

    #[test]
    fn parse_names() {
        assert_eq!("MiB".parse::<BinaryUnit>().unwrap(), BinaryUnit::MiB);
        assert_eq!("B".parse::<BinaryUnit>().unwrap(), BinaryUnit::Byte);
        assert_eq!("GB".parse::<BinaryUnit>().unwrap(), BinaryUnit::GB);
        assert!("mib".parse::<BinaryUnit>().is_err());
        for unit in [BinaryUnit::Byte, BinaryUnit::TB, BinaryUnit::TiB] {
            assert_eq!(unit.to_string().parse::<BinaryUnit>().unwrap(), unit);
        }
    }
}

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::lib::config::MB_PER_GB;
use crate::lib::error::TierCalcError;

static MEMORY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)([A-Za-z]*)$")
        .expect("memory pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemoryUnit {
    Megabytes,
    Gigabytes,
}

impl MemoryUnit {
    fn factor(&self) -> f64 {
        match self {
            MemoryUnit::Megabytes => 1.0,
            MemoryUnit::Gigabytes => MB_PER_GB,
        }
    }
}

impl FromStr for MemoryUnit {
    type Err = TierCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "G" | "g" => Ok(MemoryUnit::Gigabytes),
            "M" | "m" | "" => Ok(MemoryUnit::Megabytes),
            other => Err(TierCalcError::InvalidUnit(other.to_string())),
        }
    }
}

/// A user supplied amount of memory such as `6G`, `6144M` or `6144`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryQuantity {
    pub value: f64,
    pub unit: MemoryUnit,
}

impl MemoryQuantity {
    /// The quantity in MB, not yet rounded
    pub fn to_mb(&self) -> f64 {
        self.value * self.unit.factor()
    }
}

impl FromStr for MemoryQuantity {
    type Err = TierCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TierCalcError::EmptyMemory);
        }

        let captures = MEMORY_PATTERN
            .captures(s)
            .ok_or_else(|| TierCalcError::InvalidMemory(s.to_string()))?;

        let value = captures[1]
            .parse::<f64>()
            .map_err(|_| TierCalcError::InvalidMemory(s.to_string()))?;
        if !value.is_finite() {
            return Err(TierCalcError::InvalidMemory(s.to_string()));
        }
        let unit = captures[2].parse::<MemoryUnit>()?;

        Ok(MemoryQuantity { value, unit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mb(input: &str) -> f64 {
        input.parse::<MemoryQuantity>().unwrap().to_mb()
    }

    #[test]
    fn test_units() {
        assert_eq!(mb("6G"), 6144.0);
        assert_eq!(mb("6g"), 6144.0);
        assert_eq!(mb("6144M"), 6144.0);
        assert_eq!(mb("6144m"), 6144.0);
        assert_eq!(mb("6144"), 6144.0);
        assert_eq!(mb("1.5G"), 1536.0);
        assert_eq!(mb(".5G"), 512.0);
        assert_eq!(mb("1e3"), 1000.0);
    }

    #[test]
    fn test_invalid_unit() {
        let err = "6T".parse::<MemoryQuantity>().unwrap_err();
        assert!(matches!(err, TierCalcError::InvalidUnit(ref u) if u == "T"));

        let err = "6GB".parse::<MemoryQuantity>().unwrap_err();
        assert!(matches!(err, TierCalcError::InvalidUnit(ref u) if u == "GB"));
    }

    #[test]
    fn test_invalid_format() {
        assert!(matches!(
            "".parse::<MemoryQuantity>().unwrap_err(),
            TierCalcError::EmptyMemory
        ));
        for input in ["G", "abc", "6 G", " 6G", "6G ", "-6G", "6.5.5G", "6G!"] {
            let err = input.parse::<MemoryQuantity>().unwrap_err();
            assert!(
                matches!(err, TierCalcError::InvalidMemory(_)),
                "{input:?} gave {err:?}"
            );
        }
    }
}

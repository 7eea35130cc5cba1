// wallet-core/src/network/models.rs
//
// Balance Model - Chain-Agnostic Structure cho Balance Collaborator
//
// Serialize/Deserialize friendly (JSON), không phụ thuộc vào
// chain-specific types (EVM U256, Solana Lamports, etc.)

use serde::{Deserialize, Serialize};

/// Số dư native token (chain-agnostic, display-only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Số dư raw theo đơn vị nhỏ nhất (string để tránh overflow với số lớn)
    pub raw: String,
    /// Số dư đã format với decimals (e.g., "1.5")
    pub formatted: String,
    /// Symbol (e.g., "ETH", "SOL")
    pub symbol: String,
    /// Số decimals
    pub decimals: u8,
}

impl Balance {
    /// Tạo Balance từ raw value và decimals
    ///
    /// Format thủ công bằng integer math — không đi qua f64 để khỏi mất
    /// precision với balance lớn.
    pub fn new(raw: impl Into<String>, decimals: u8, symbol: impl Into<String>) -> Self {
        let raw_str = raw.into();
        let formatted = Self::format_units(&raw_str, decimals);
        Self {
            raw: raw_str,
            formatted,
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Format raw integer string theo decimals: "1500000000" + 9 -> "1.5"
    fn format_units(raw: &str, decimals: u8) -> String {
        let decimals = decimals as usize;
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return "0".to_string();
        }

        let padded = if digits.len() <= decimals {
            format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
        } else {
            digits
        };

        let split = padded.len() - decimals;
        let whole = padded[..split].trim_start_matches('0');
        let whole = if whole.is_empty() { "0" } else { whole };
        let frac = padded[split..].trim_end_matches('0');

        if frac.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, frac)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_and_fraction() {
        let balance = Balance::new("1500000000", 9, "SOL");
        assert_eq!(balance.formatted, "1.5");
        assert_eq!(balance.raw, "1500000000");
        assert_eq!(balance.symbol, "SOL");
    }

    #[test]
    fn test_format_sub_unit() {
        let balance = Balance::new("42", 18, "ETH");
        assert_eq!(balance.formatted, "0.000000000000000042");
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(Balance::new("0", 18, "ETH").formatted, "0");
    }

    #[test]
    fn test_format_exact_whole() {
        assert_eq!(Balance::new("2000000000000000000", 18, "ETH").formatted, "2");
    }

    #[test]
    fn test_serde_camel_case() {
        let balance = Balance::new("1000000000", 9, "SOL");
        let json = serde_json::to_string(&balance).unwrap();
        assert!(json.contains("\"formatted\":\"1\""));
        assert!(json.contains("\"decimals\":9"));
    }
}

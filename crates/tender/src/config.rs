//! Display settings for revealed bid amounts.

use serde::{Deserialize, Serialize};

pub const CURRENCY_ENV: &str = "RIGOPS_CURRENCY";
pub const SEPARATOR_ENV: &str = "RIGOPS_THOUSANDS_SEPARATOR";

/// How an unsealed amount is rendered: `"<currency_code> <grouped digits>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BidDisplay {
    /// ISO 4217 code, e.g. "IDR".
    pub currency_code: String,
    pub thousands_separator: char,
}

impl Default for BidDisplay {
    fn default() -> Self {
        Self {
            currency_code: "IDR".to_string(),
            thousands_separator: '.',
        }
    }
}

impl BidDisplay {
    /// Defaults overridden by `RIGOPS_CURRENCY` / `RIGOPS_THOUSANDS_SEPARATOR`.
    ///
    /// Unusable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut out = Self::default();

        if let Some(code) = lookup(CURRENCY_ENV) {
            let code = code.trim().to_ascii_uppercase();
            if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
                out.currency_code = code;
            } else {
                let fallback = &out.currency_code;
                tracing::warn!(value = %code, fallback = %fallback, "{CURRENCY_ENV} is not an ISO currency code");
            }
        }

        if let Some(sep) = lookup(SEPARATOR_ENV) {
            let mut chars = sep.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if !c.is_ascii_digit() => out.thousands_separator = c,
                _ => tracing::warn!(value = %sep, "{SEPARATOR_ENV} must be a single non-digit character"),
            }
        }

        out
    }

    /// `"IDR 45.000.000.000"`.
    pub fn format_amount(&self, amount: u64) -> String {
        format!("{} {}", self.currency_code, group_thousands(amount, self.thousands_separator))
    }

    /// Placeholder for a bid without an amount: `"IDR -"`.
    pub fn missing_amount(&self) -> String {
        format!("{} -", self.currency_code)
    }
}

fn group_thousands(amount: u64, separator: char) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

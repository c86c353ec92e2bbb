// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Fee and interest strategies.
//!
//! Both variant sets are closed, so they are plain value enums owned by the
//! account rather than boxed trait objects. Every calculation is a pure
//! function of its inputs and the parameters captured at construction.
//!
//! # Example
//!
//! ```
//! use atm_bank::{FeeStrategy, InterestStrategy};
//!
//! assert_eq!(FeeStrategy::Percentage { rate: 0.5 }.calculate_fee(100.0), 0.5);
//! assert_eq!(InterestStrategy::Simple.calculate_interest(1000.0, 5.0), 50.0);
//! ```

use crate::AccountError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fee charged on each deposit or withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeeStrategy {
    /// No fee.
    #[default]
    None,
    /// `rate` percent of the requested amount.
    Percentage { rate: f64 },
    /// Fixed `amount` regardless of the requested amount.
    Flat { amount: f64 },
}

impl FeeStrategy {
    /// Fee for an operation of `amount`.
    pub fn calculate_fee(&self, amount: f64) -> f64 {
        match *self {
            Self::None => 0.0,
            Self::Percentage { rate } => amount * rate / 100.0,
            Self::Flat { amount: fee } => fee,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), AccountError> {
        match *self {
            Self::None => Ok(()),
            Self::Percentage { rate } if !is_non_negative(rate) => Err(
                AccountError::InvalidParameter("fee rate must be a non-negative number"),
            ),
            Self::Flat { amount } if !is_non_negative(amount) => Err(
                AccountError::InvalidParameter("flat fee must be a non-negative number"),
            ),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for FeeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Percentage { rate } => write!(f, "percent:{rate}"),
            Self::Flat { amount } => write!(f, "flat:{amount}"),
        }
    }
}

/// Parses `none`, `percent:<rate>` or `flat:<amount>`.
impl FromStr for FeeStrategy {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (kind, param) = match s.split_once(':') {
            Some((kind, param)) => (kind.trim(), Some(param.trim())),
            None => (s, None),
        };

        let strategy = match (kind.to_ascii_lowercase().as_str(), param) {
            ("" | "none", None) => Self::None,
            ("percent" | "percentage", Some(rate)) => Self::Percentage {
                rate: parse_number(rate)?,
            },
            ("flat", Some(amount)) => Self::Flat {
                amount: parse_number(amount)?,
            },
            _ => return Err(AccountError::InvalidParameter("unrecognised fee strategy")),
        };
        strategy.validate()?;
        Ok(strategy)
    }
}

/// Interest credited to a savings account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterestStrategy {
    /// `balance * rate / 100`.
    #[default]
    Simple,
    /// Compounded `frequency` times over one period.
    Compound { frequency: u32 },
}

impl InterestStrategy {
    /// Interest earned on `balance` at `rate` percent for one period.
    ///
    /// Non-positive balances yield non-positive interest; nothing is clamped.
    pub fn calculate_interest(&self, balance: f64, rate: f64) -> f64 {
        match *self {
            Self::Simple => balance * rate / 100.0,
            Self::Compound { frequency } => {
                let n = f64::from(frequency);
                balance * ((1.0 + rate / (100.0 * n)).powf(n) - 1.0)
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<(), AccountError> {
        match self {
            Self::Compound { frequency: 0 } => Err(AccountError::InvalidParameter(
                "compound frequency must be positive",
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for InterestStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => f.write_str("simple"),
            Self::Compound { frequency } => write!(f, "compound:{frequency}"),
        }
    }
}

/// Parses `simple` or `compound:<frequency>`.
impl FromStr for InterestStrategy {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let strategy = match s.split_once(':') {
            None if s.is_empty() || s.eq_ignore_ascii_case("simple") => Self::Simple,
            Some((kind, frequency)) if kind.trim().eq_ignore_ascii_case("compound") => {
                Self::Compound {
                    frequency: frequency.trim().parse().map_err(|_| {
                        AccountError::InvalidParameter("compound frequency must be an integer")
                    })?,
                }
            }
            _ => {
                return Err(AccountError::InvalidParameter(
                    "unrecognised interest strategy",
                ));
            }
        };
        strategy.validate()?;
        Ok(strategy)
    }
}

pub(crate) fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn parse_number(s: &str) -> Result<f64, AccountError> {
    s.parse()
        .map_err(|_| AccountError::InvalidParameter("strategy parameter must be a number"))
}

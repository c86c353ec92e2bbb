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

//! Error types for account operations.

use thiserror::Error;

/// Account operation errors.
///
/// Every failing operation leaves the account balance untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Amount is zero, negative, or not a finite number
    #[error("invalid amount (must be positive)")]
    InvalidAmount,

    /// Withdrawal would take the balance below zero
    #[error("insufficient available funds")]
    InsufficientFunds,

    /// The fee charged on a deposit is larger than the deposit itself
    #[error("fee exceeds the deposited amount")]
    FeeExceedsAmount,

    /// Withdrawal would take a current account past its overdraft limit
    #[error("overdraft limit exceeded")]
    OverdraftExceeded,

    /// Withdrawal would take a savings account below its minimum balance
    #[error("minimum balance would be violated")]
    MinimumBalanceViolation,

    /// Interest was requested on an account that does not earn any
    #[error("account does not bear interest")]
    NotInterestBearing,

    /// The operation would leave a balance outside the finite range
    #[error("balance would overflow")]
    BalanceOverflow,

    /// Account or strategy parameters rejected at construction
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

impl AccountError {
    /// Returns `true` for every flavour of "not enough money".
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(
            self,
            Self::InsufficientFunds | Self::OverdraftExceeded | Self::MinimumBalanceViolation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::AccountError;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            AccountError::InvalidAmount.to_string(),
            "invalid amount (must be positive)"
        );
        assert_eq!(
            AccountError::InsufficientFunds.to_string(),
            "insufficient available funds"
        );
        assert_eq!(
            AccountError::FeeExceedsAmount.to_string(),
            "fee exceeds the deposited amount"
        );
        assert_eq!(AccountError::OverdraftExceeded.to_string(), "overdraft limit exceeded");
        assert_eq!(
            AccountError::MinimumBalanceViolation.to_string(),
            "minimum balance would be violated"
        );
        assert_eq!(
            AccountError::NotInterestBearing.to_string(),
            "account does not bear interest"
        );
        assert_eq!(AccountError::BalanceOverflow.to_string(), "balance would overflow");
        assert_eq!(
            AccountError::InvalidParameter("overdraft limit must be non-negative").to_string(),
            "invalid parameter: overdraft limit must be non-negative"
        );
    }

    #[test]
    fn insufficient_funds_family() {
        assert!(AccountError::InsufficientFunds.is_insufficient_funds());
        assert!(AccountError::OverdraftExceeded.is_insufficient_funds());
        assert!(AccountError::MinimumBalanceViolation.is_insufficient_funds());
        assert!(!AccountError::InvalidAmount.is_insufficient_funds());
        assert!(!AccountError::FeeExceedsAmount.is_insufficient_funds());
    }

    #[test]
    fn errors_are_cloneable() {
        let error = AccountError::OverdraftExceeded;
        let cloned = error.clone();
        assert_eq!(error, cloned);
    }
}

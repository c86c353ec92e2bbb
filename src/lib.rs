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

//! # ATM Bank
//!
//! This library provides the account core behind an ATM: savings and current
//! accounts with pluggable fee and interest strategies, a thin ATM façade, and
//! a registry that owns accounts and reports on them.
//!
//! ## Core Components
//!
//! - [`Account`]: Savings or current account with balance-floor enforcement
//! - [`FeeStrategy`] / [`InterestStrategy`]: Pure fee and interest calculators
//! - [`Atm`]: Non-owning façade that forwards operations and prints outcomes
//! - [`BankingSystem`]: Owning registry with lookup by account number
//! - [`AccountError`]: Error types for rejected operations
//!
//! ## Example
//!
//! ```
//! use atm_bank::{Account, BankingSystem, SavingsTerms};
//!
//! let mut bank = BankingSystem::new();
//! bank.open_account(Account::current("87654321", 500.0, 200.0)).unwrap();
//!
//! let account = bank.find_account_mut("87654321").unwrap();
//! account.withdraw(600.0).unwrap();
//! assert_eq!(account.balance(), -100.0);
//! assert!(account.withdraw(200.0).is_err());
//!
//! bank.open_account(Account::savings("12345678", 500.0, SavingsTerms::new(0.0))).unwrap();
//! assert_eq!(bank.live_accounts(), 2);
//! ```
//!
//! ## Execution Model
//!
//! Everything is single-threaded and synchronous. Accounts are mutated only
//! through `&mut` borrows, so no operation can interleave with another on the
//! same account.

pub mod account;
pub mod atm;
mod bank;
mod base;
mod counter;
pub mod error;
pub mod strategy;
mod transaction;
pub mod validator;

pub use account::{Account, AccountBuilder, AccountKind, InterestBearing, SavingsTerms};
pub use atm::Atm;
pub use bank::{BankingSystem, ReportLine};
pub use base::{AccountNumber, AccountType};
pub use counter::AccountCounter;
pub use error::AccountError;
pub use strategy::{FeeStrategy, InterestStrategy};
pub use transaction::Transaction;

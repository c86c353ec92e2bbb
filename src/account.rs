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

//! Account management.
//!
//! An [`Account`] is one of two variants, told apart by [`AccountKind`]:
//!
//! - **Savings**: earns interest through its [`InterestStrategy`] and may not
//!   drop below its minimum balance.
//! - **Current**: earns nothing but may go negative down to its overdraft limit.
//!
//! Both charge fees through the [`FeeStrategy`] they own, computed once per
//! operation from the requested amount.
//!
//! # Example
//!
//! ```
//! use atm_bank::{Account, FeeStrategy, SavingsTerms};
//!
//! let mut account = Account::savings("12345", 1000.0, SavingsTerms::new(5.0))
//!     .fee(FeeStrategy::Percentage { rate: 0.5 })
//!     .open()
//!     .unwrap();
//!
//! account.deposit(100.0).unwrap();
//! assert_eq!(account.balance(), 1099.5);
//! ```

use crate::base::{AccountNumber, AccountType};
use crate::counter::{AccountCounter, LiveAccount};
use crate::strategy::{FeeStrategy, InterestStrategy, is_non_negative};
use crate::validator;
use crate::{AccountError, Transaction};

/// Parameters specific to savings accounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsTerms {
    interest_rate: f64,
    interest: InterestStrategy,
    minimum_balance: f64,
}

impl SavingsTerms {
    /// Terms paying `interest_rate` percent per period with simple interest
    /// and no minimum balance.
    pub fn new(interest_rate: f64) -> Self {
        Self {
            interest_rate,
            interest: InterestStrategy::Simple,
            minimum_balance: 0.0,
        }
    }

    pub fn with_interest(mut self, interest: InterestStrategy) -> Self {
        self.interest = interest;
        self
    }

    pub fn with_minimum_balance(mut self, minimum_balance: f64) -> Self {
        self.minimum_balance = minimum_balance;
        self
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn interest_strategy(&self) -> InterestStrategy {
        self.interest
    }

    pub fn minimum_balance(&self) -> f64 {
        self.minimum_balance
    }

    fn validate(&self) -> Result<(), AccountError> {
        if !is_non_negative(self.interest_rate) {
            return Err(AccountError::InvalidParameter(
                "interest rate must be a non-negative number",
            ));
        }
        if !is_non_negative(self.minimum_balance) {
            return Err(AccountError::InvalidParameter(
                "minimum balance must be a non-negative number",
            ));
        }
        self.interest.validate()
    }
}

/// Variant of an account together with its variant-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccountKind {
    Savings(SavingsTerms),
    Current { overdraft_limit: f64 },
}

impl AccountKind {
    pub fn account_type(&self) -> AccountType {
        match self {
            Self::Savings(_) => AccountType::Savings,
            Self::Current { .. } => AccountType::Current,
        }
    }

    /// Lowest balance a successful operation may leave behind.
    pub fn floor(&self) -> f64 {
        match self {
            Self::Savings(terms) => terms.minimum_balance,
            Self::Current { overdraft_limit } => -overdraft_limit,
        }
    }

    fn validate(&self) -> Result<(), AccountError> {
        match self {
            Self::Savings(terms) => terms.validate(),
            Self::Current { overdraft_limit } if !is_non_negative(*overdraft_limit) => Err(
                AccountError::InvalidParameter("overdraft limit must be a non-negative number"),
            ),
            Self::Current { .. } => Ok(()),
        }
    }

    /// Error reported when a withdrawal would cross the floor.
    fn shortfall(&self) -> AccountError {
        match self {
            Self::Savings(terms) if terms.minimum_balance > 0.0 => {
                AccountError::MinimumBalanceViolation
            }
            Self::Current { overdraft_limit } if *overdraft_limit > 0.0 => {
                AccountError::OverdraftExceeded
            }
            _ => AccountError::InsufficientFunds,
        }
    }
}

/// Bank account.
///
/// # Invariants
///
/// - The account number never changes.
/// - After every successful operation `balance >= kind.floor()`.
/// - A failed operation leaves the balance untouched.
#[derive(Debug)]
pub struct Account {
    number: AccountNumber,
    balance: f64,
    fee: FeeStrategy,
    kind: AccountKind,
    live: Option<LiveAccount>,
}

impl Account {
    /// Starts building a savings account.
    pub fn savings(
        number: impl Into<AccountNumber>,
        opening_balance: f64,
        terms: SavingsTerms,
    ) -> AccountBuilder {
        AccountBuilder::new(number.into(), opening_balance, AccountKind::Savings(terms))
    }

    /// Starts building a current account allowed to overdraw by `overdraft_limit`.
    pub fn current(
        number: impl Into<AccountNumber>,
        opening_balance: f64,
        overdraft_limit: f64,
    ) -> AccountBuilder {
        AccountBuilder::new(
            number.into(),
            opening_balance,
            AccountKind::Current { overdraft_limit },
        )
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn fee_strategy(&self) -> FeeStrategy {
        self.fee
    }

    /// Lowest balance this account may hold.
    pub fn floor(&self) -> f64 {
        self.kind.floor()
    }

    /// Largest `amount + fee` a withdrawal may currently take.
    pub fn available_to_withdraw(&self) -> f64 {
        self.balance - self.floor()
    }

    /// Returns `true` if the account is counted by some [`AccountCounter`].
    pub fn is_tracked(&self) -> bool {
        self.live.is_some()
    }

    /// Counter tracking this account, if any.
    pub fn counter(&self) -> Option<AccountCounter> {
        self.live.as_ref().map(LiveAccount::counter)
    }

    pub(crate) fn track(&mut self, counter: &AccountCounter) {
        if self.live.is_none() {
            self.live = Some(counter.register());
        }
    }

    /// Interest-bearing view of the account, if it is a savings account.
    pub fn as_interest_bearing_mut(&mut self) -> Option<InterestBearing<'_>> {
        let AccountKind::Savings(terms) = self.kind else {
            return None;
        };
        Some(InterestBearing {
            account: self,
            terms,
        })
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= self.floor(),
            "Invariant violated: balance {} below floor {}",
            self.balance,
            self.floor()
        );
    }

    /// Stores `candidate` as the new balance unless it left the finite range.
    fn settle(&mut self, candidate: f64) -> Result<f64, AccountError> {
        if !candidate.is_finite() {
            return Err(AccountError::BalanceOverflow);
        }
        self.balance = candidate;
        self.assert_invariants();
        Ok(candidate)
    }

    /// Credits `amount` minus the fee.
    ///
    /// # Errors
    ///
    /// - [`AccountError::InvalidAmount`] if `amount` is not a positive number.
    /// - [`AccountError::FeeExceedsAmount`] if the fee is larger than `amount`.
    /// - [`AccountError::BalanceOverflow`] if the new balance would not be finite.
    pub fn deposit(&mut self, amount: f64) -> Result<Transaction, AccountError> {
        if !validator::is_valid_amount(amount) {
            return Err(AccountError::InvalidAmount);
        }
        let fee = self.fee.calculate_fee(amount);
        if fee > amount {
            return Err(AccountError::FeeExceedsAmount);
        }

        let balance = self.settle(self.balance + (amount - fee))?;
        Ok(Transaction::Deposit {
            amount,
            fee,
            balance,
        })
    }

    /// Debits `amount` plus the fee, keeping the balance at or above the floor.
    ///
    /// # Errors
    ///
    /// - [`AccountError::InvalidAmount`] if `amount` is not a positive number.
    /// - [`AccountError::MinimumBalanceViolation`] for savings accounts with a
    ///   minimum balance, [`AccountError::OverdraftExceeded`] for current accounts
    ///   with an overdraft, [`AccountError::InsufficientFunds`] otherwise.
    pub fn withdraw(&mut self, amount: f64) -> Result<Transaction, AccountError> {
        if !validator::is_valid_amount(amount) {
            return Err(AccountError::InvalidAmount);
        }
        let fee = self.fee.calculate_fee(amount);
        let total = amount + fee;
        if !validator::has_enough_balance_within(self.balance, total, -self.floor()) {
            return Err(self.kind.shortfall());
        }

        let balance = self.settle(self.balance - total)?;
        Ok(Transaction::Withdrawal {
            amount,
            fee,
            balance,
        })
    }

    /// Credits one period of interest.
    ///
    /// # Errors
    ///
    /// - [`AccountError::NotInterestBearing`] for current accounts.
    /// - [`AccountError::BalanceOverflow`] if the new balance would not be finite.
    pub fn apply_interest(&mut self) -> Result<Transaction, AccountError> {
        self.as_interest_bearing_mut()
            .ok_or(AccountError::NotInterestBearing)?
            .apply_interest()
    }
}

/// Mutable handle on a savings account, the only variant that earns interest.
#[derive(Debug)]
pub struct InterestBearing<'a> {
    account: &'a mut Account,
    terms: SavingsTerms,
}

impl InterestBearing<'_> {
    pub fn terms(&self) -> &SavingsTerms {
        &self.terms
    }

    /// Credits one period of interest.
    ///
    /// Applying it again compounds on the new balance.
    ///
    /// # Errors
    ///
    /// [`AccountError::BalanceOverflow`] if the new balance would not be finite.
    pub fn apply_interest(&mut self) -> Result<Transaction, AccountError> {
        let interest = self
            .terms
            .interest
            .calculate_interest(self.account.balance, self.terms.interest_rate);
        let balance = self.account.settle(self.account.balance + interest)?;
        Ok(Transaction::Interest { interest, balance })
    }
}

/// Method-chained construction of an [`Account`].
#[derive(Debug, Clone)]
#[must_use = "an account is only created by calling `open`"]
pub struct AccountBuilder {
    number: AccountNumber,
    opening_balance: f64,
    kind: AccountKind,
    fee: FeeStrategy,
    counter: Option<AccountCounter>,
}

impl AccountBuilder {
    fn new(number: AccountNumber, opening_balance: f64, kind: AccountKind) -> Self {
        Self {
            number,
            opening_balance,
            kind,
            fee: FeeStrategy::None,
            counter: None,
        }
    }

    pub fn fee(mut self, fee: FeeStrategy) -> Self {
        self.fee = fee;
        self
    }

    /// Counts the account in `counter` for as long as it lives.
    pub fn tracked_by(mut self, counter: &AccountCounter) -> Self {
        self.counter = Some(counter.clone());
        self
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub(crate) fn has_counter(&self) -> bool {
        self.counter.is_some()
    }

    /// Validates the parameters and creates the account.
    ///
    /// # Errors
    ///
    /// [`AccountError::InvalidParameter`] if the number is empty, a parameter is
    /// negative or not finite, or the opening balance is below the floor.
    pub fn open(self) -> Result<Account, AccountError> {
        if self.number.as_str().is_empty() {
            return Err(AccountError::InvalidParameter("account number must not be empty"));
        }
        if !self.opening_balance.is_finite() {
            return Err(AccountError::InvalidParameter("opening balance must be finite"));
        }
        self.kind.validate()?;
        self.fee.validate()?;
        if self.opening_balance < self.kind.floor() {
            return Err(AccountError::InvalidParameter(
                "opening balance is below the account floor",
            ));
        }

        let live = self.counter.as_ref().map(AccountCounter::register);
        Ok(Account {
            number: self.number,
            balance: self.opening_balance,
            fee: self.fee,
            kind: self.kind,
            live,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_savings(balance: f64) -> Account {
        Account::savings("S1", balance, SavingsTerms::new(0.0))
            .open()
            .unwrap()
    }

    #[test]
    fn failed_deposit_leaves_balance() {
        let mut account = plain_savings(100.0);
        assert_eq!(account.deposit(0.0), Err(AccountError::InvalidAmount));
        assert_eq!(account.deposit(f64::NAN), Err(AccountError::InvalidAmount));
        assert_eq!(account.balance(), 100.0);
    }

    #[test]
    fn savings_without_minimum_reports_insufficient_funds() {
        let mut account = plain_savings(100.0);
        assert_eq!(account.withdraw(100.01), Err(AccountError::InsufficientFunds));
        assert_eq!(account.balance(), 100.0);
    }

    #[test]
    fn current_without_overdraft_reports_insufficient_funds() {
        let mut account = Account::current("C1", 50.0, 0.0).open().unwrap();
        assert_eq!(account.withdraw(60.0), Err(AccountError::InsufficientFunds));
    }

    #[test]
    fn floor_per_variant() {
        let savings = Account::savings("S", 500.0, SavingsTerms::new(1.0).with_minimum_balance(50.0))
            .open()
            .unwrap();
        let current = Account::current("C", 0.0, 200.0).open().unwrap();
        assert_eq!(savings.floor(), 50.0);
        assert_eq!(savings.available_to_withdraw(), 450.0);
        assert_eq!(current.floor(), -200.0);
        assert_eq!(current.available_to_withdraw(), 200.0);
    }

    #[test]
    fn overflowing_interest_is_rejected() {
        let mut account = Account::savings("S", f64::MAX, SavingsTerms::new(50.0))
            .open()
            .unwrap();
        assert_eq!(account.apply_interest(), Err(AccountError::BalanceOverflow));
        assert_eq!(account.balance(), f64::MAX);
    }

    #[test]
    fn only_savings_are_interest_bearing() {
        let mut savings = plain_savings(10.0);
        let mut current = Account::current("C", 10.0, 0.0).open().unwrap();
        assert!(savings.as_interest_bearing_mut().is_some());
        assert!(current.as_interest_bearing_mut().is_none());
    }

    #[test]
    fn track_is_idempotent() {
        let counter = AccountCounter::new();
        let mut account = plain_savings(1.0);
        assert!(!account.is_tracked());
        account.track(&counter);
        account.track(&counter);
        assert_eq!(counter.live(), 1);
        assert!(account.counter().unwrap().same_as(&counter));
        drop(account);
        assert_eq!(counter.live(), 0);
    }

    #[test]
    fn builder_registers_only_on_success() {
        let counter = AccountCounter::new();
        let rejected = Account::current("C", -10.0, 0.0).tracked_by(&counter).open();
        assert!(rejected.is_err());
        assert_eq!(counter.live(), 0);

        let _account = Account::current("C", 0.0, 0.0)
            .tracked_by(&counter)
            .open()
            .unwrap();
        assert_eq!(counter.live(), 1);
    }
}

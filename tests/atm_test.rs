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

//! ATM façade integration tests.

use atm_bank::{Account, Atm, FeeStrategy, InterestStrategy, SavingsTerms, Transaction};

fn captured(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

#[test]
fn forwards_deposit_and_withdrawal() {
    let mut account = Account::savings("12345678", 500.0, SavingsTerms::new(0.0))
        .open()
        .unwrap();
    let mut atm = Atm::with_output(&mut account, Vec::new(), Vec::new());

    assert!(atm.add_amount(200.0).is_some());
    assert!(atm.withdraw_amount(100.0).is_some());
    assert_eq!(atm.balance(), 600.0);

    let (out, err) = atm.into_output();
    assert_eq!(
        captured(out),
        "Deposited: 200. New balance: 700\nWithdrew: 100. Remaining balance: 600\n"
    );
    assert!(err.is_empty());
    assert_eq!(account.balance(), 600.0);
}

#[test]
fn failures_are_reported_not_propagated() {
    let mut account = Account::current("87654321", 500.0, 200.0).open().unwrap();
    let mut atm = Atm::with_output(&mut account, Vec::new(), Vec::new());

    assert!(atm.withdraw_amount(600.0).is_some());
    assert!(atm.withdraw_amount(200.0).is_none());
    assert!(atm.add_amount(-1.0).is_none());
    assert_eq!(atm.balance(), -100.0);

    let (out, err) = atm.into_output();
    assert_eq!(captured(out), "Withdrew: 600. Remaining balance: -100\n");
    assert_eq!(
        captured(err),
        "ERROR: overdraft limit exceeded\nERROR: invalid amount (must be positive)\n"
    );
}

#[test]
fn specific_behavior_applies_interest_to_savings() {
    let mut account = Account::savings(
        "12345",
        1000.0,
        SavingsTerms::new(5.0).with_interest(InterestStrategy::Simple),
    )
    .fee(FeeStrategy::Percentage { rate: 0.5 })
    .open()
    .unwrap();
    let mut atm = Atm::with_output(&mut account, Vec::new(), Vec::new());

    atm.add_amount(100.0);
    let applied = atm.apply_specific_behavior().unwrap();
    assert!(matches!(applied, Transaction::Interest { .. }));
    assert!((atm.balance() - 1154.475).abs() < 1e-9);

    let (out, _) = atm.into_output();
    let out = captured(out);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Deposited: 100. New balance: 1099.5");
    assert!(lines[1].starts_with("Interest Applied: "));
}

#[test]
fn specific_behavior_is_a_no_op_for_current() {
    let mut account = Account::current("C", 1000.0, 100.0).open().unwrap();
    let mut atm = Atm::with_output(&mut account, Vec::new(), Vec::new());

    assert!(atm.apply_specific_behavior().is_none());
    assert_eq!(atm.balance(), 1000.0);

    let (out, err) = atm.into_output();
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn atm_borrows_without_owning() {
    let mut account = Account::current("C", 10.0, 0.0).open().unwrap();
    {
        let mut atm = Atm::with_output(&mut account, Vec::new(), Vec::new());
        atm.add_amount(5.0);
        assert_eq!(atm.account().number(), "C");
    }
    // The account outlives the ATM and keeps its state.
    assert_eq!(account.balance(), 15.0);
    let mut atm = Atm::with_output(&mut account, Vec::new(), Vec::new());
    atm.withdraw_amount(15.0);
    assert_eq!(atm.balance(), 0.0);
}

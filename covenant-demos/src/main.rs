//! Ledger demo for the covenant contract engine
//!
//! Runs a handful of operations on a contract-checked ledger, catching each
//! violation at the demo's boundary and logging it.
//!
//! Usage: `ledger_demo [overdraft-amount]`

use anyhow::{Context, Result};
use covenant_contracts::{self as contract, Assert, ContractResult, Invariant};
use tracing::{info, warn};

/// A ledger whose balance always equals the sum of its entries and never
/// goes negative
#[derive(Debug)]
struct Ledger {
    entries: Vec<i64>,
    balance: i64,
}

impl Invariant for Ledger {
    fn invariant(&self, assert: &Assert) {
        assert.check(
            self.balance >= 0,
            format_args!("balance {} must be non-negative", self.balance),
        );
        assert.check(
            self.entries.iter().sum::<i64>() == self.balance,
            "balance must equal the sum of entries",
        );
    }
}

impl Ledger {
    fn open(initial: i64) -> Self {
        let ledger = Ledger {
            entries: vec![initial],
            balance: initial,
        };
        contract::construct(&ledger);
        ledger
    }

    fn deposit(&mut self, amount: i64) {
        contract::enter_then_exit(self, |ledger: &Ledger, assert: &Assert| {
            assert.check(amount > 0, "deposit must be positive");
            let before = ledger.balance;
            move |ledger: &Ledger, assert: &Assert| {
                assert.check(ledger.balance == before + amount, "deposit must add its amount")
            }
        })
        .around(self, |ledger| {
            ledger.entries.push(amount);
            ledger.balance += amount;
        });
    }

    /// Withdraws without checking funds first; an overdraft is rolled back
    /// before the violation is reported.
    fn withdraw(&mut self, amount: i64) {
        contract::enter_then_exit_with_restore(self, |ledger: &Ledger, assert: &Assert| {
            assert.check(amount > 0, "withdrawal must be positive");
            let before = ledger.balance;
            let entries = ledger.entries.len();
            (
                move |ledger: &Ledger, assert: &Assert| {
                    assert.check(ledger.balance <= before, "withdrawal must not add funds")
                },
                move |ledger: &mut Ledger| {
                    ledger.entries.truncate(entries);
                    ledger.balance = before;
                },
            )
        })
        .around(self, |ledger| {
            ledger.entries.push(-amount);
            ledger.balance -= amount;
        });
    }

    /// A buggy transfer: it records the entry but forgets the balance, and
    /// its rollback leaves a stray entry behind.
    fn transfer_out(&mut self, amount: i64) {
        let restore: contract::Restore<'_, Ledger> = Box::new(move |ledger: &mut Ledger| {
            ledger.entries.push(amount);
            ledger.entries.push(-amount);
        });
        contract::guarded_with_restore(self, None, Some(restore), |ledger| {
            ledger.entries.push(-amount);
        });
    }
}

fn report(step: &str, outcome: ContractResult<()>, ledger: &Ledger) {
    match outcome {
        Ok(()) => info!(step, balance = ledger.balance, "ok"),
        Err(violation) => warn!(
            step,
            phase = %violation.phase(),
            balance = ledger.balance,
            "{}",
            violation
        ),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();
    contract::install_panic_hook();

    let overdraft = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<i64>())
        .transpose()
        .context("overdraft amount must be an integer")?
        .unwrap_or(500);

    let mut ledger = Ledger::open(100);
    info!(?ledger, "opened ledger");

    let outcome = contract::catch_violation(|| ledger.deposit(50));
    report("deposit 50", outcome, &ledger);

    let outcome = contract::catch_violation(|| ledger.deposit(0));
    report("deposit 0", outcome, &ledger);

    let outcome = contract::catch_violation(|| ledger.withdraw(30));
    report("withdraw 30", outcome, &ledger);

    let outcome = contract::catch_violation(|| ledger.withdraw(overdraft));
    report("overdraft", outcome, &ledger);

    let outcome = contract::catch_violation(|| ledger.transfer_out(20));
    report("transfer 20", outcome, &ledger);

    info!(?ledger, "final ledger");
    Ok(())
}

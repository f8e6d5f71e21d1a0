//! Wallet economy — balances, transactions, and trade pricing.
//!
//! Quest payouts and market trades all move currency through a [`Wallet`].
//! A withdrawal that would overdraw fails instead of going negative.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OutpostError, Result};
use crate::market::MarketItem;

/// A currency balance attached to a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Current balance.
    pub balance: i64,
}

/// A single signed movement of currency with its cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Positive for income, negative for spending.
    pub delta: i64,
    /// Why the currency moved ("quest reward", "bought 2x core:torch", ...).
    pub reason: String,
}

impl Transaction {
    /// Create a transaction record.
    #[must_use]
    pub fn new(delta: i64, reason: impl Into<String>) -> Self {
        Self {
            delta,
            reason: reason.into(),
        }
    }
}

impl Wallet {
    /// Create a wallet with a starting balance.
    #[must_use]
    pub fn with_balance(balance: i64) -> Self {
        Self { balance }
    }

    /// Add funds.
    pub fn deposit(&mut self, amount: i64) {
        self.balance = self.balance.saturating_add(amount.max(0));
    }

    /// Remove funds.
    ///
    /// # Errors
    /// Returns `OutpostError::InsufficientFunds` if the balance would go
    /// negative; the wallet is left untouched in that case.
    pub fn withdraw(&mut self, amount: i64) -> Result<()> {
        let amount = amount.max(0);
        if amount > self.balance {
            return Err(OutpostError::InsufficientFunds {
                needed: amount,
                balance: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Apply a signed transaction.
    ///
    /// # Errors
    /// Returns `OutpostError::InsufficientFunds` for a debit larger than the
    /// balance.
    pub fn apply(&mut self, transaction: &Transaction) -> Result<()> {
        if transaction.delta >= 0 {
            self.deposit(transaction.delta);
        } else {
            self.withdraw(-transaction.delta)?;
        }
        debug!(
            delta = transaction.delta,
            balance = self.balance,
            reason = %transaction.reason,
            "wallet transaction applied"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Trade pricing
// ---------------------------------------------------------------------------

/// What a player pays to buy `quantity` units of `item` at list price.
#[must_use]
pub fn purchase_cost(item: &MarketItem, quantity: u32) -> i64 {
    i64::from(item.cost) * i64::from(quantity)
}

/// What a merchant pays when buying `quantity` units back from a player.
/// `buyback_rate_percent` comes from the market config.
#[must_use]
pub fn sale_value(item: &MarketItem, quantity: u32, buyback_rate_percent: u32) -> i64 {
    purchase_cost(item, quantity) * i64::from(buyback_rate_percent) / 100
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torch() -> MarketItem {
        MarketItem {
            id: "core:torch".to_string(),
            display_name: "Torches".to_string(),
            description: String::new(),
            cost: 5,
            quantity: 2,
            buyable: true,
            sellable: true,
        }
    }

    #[test]
    fn deposit_and_withdraw_round_trip() {
        let mut wallet = Wallet::default();
        wallet.deposit(50);
        wallet.withdraw(20).expect("funds available");
        assert_eq!(wallet.balance, 30);
    }

    #[test]
    fn overdraw_fails_and_leaves_balance_untouched() {
        let mut wallet = Wallet::with_balance(10);
        let err = wallet.withdraw(11).expect_err("overdraw");
        assert!(matches!(
            err,
            OutpostError::InsufficientFunds { needed: 11, balance: 10 }
        ));
        assert_eq!(wallet.balance, 10);
    }

    #[test]
    fn negative_deposit_is_ignored() {
        let mut wallet = Wallet::with_balance(5);
        wallet.deposit(-100);
        assert_eq!(wallet.balance, 5);
    }

    #[test]
    fn apply_routes_by_sign() {
        let mut wallet = Wallet::default();
        wallet
            .apply(&Transaction::new(50, "quest reward"))
            .expect("credit");
        assert!(wallet.apply(&Transaction::new(-60, "overpriced hat")).is_err());
        assert_eq!(wallet.balance, 50);
    }

    #[test]
    fn sale_value_is_a_fraction_of_cost() {
        let item = torch();
        assert_eq!(purchase_cost(&item, 4), 20);
        assert_eq!(sale_value(&item, 4, 60), 12);
        assert_eq!(sale_value(&item, 1, 0), 0);
    }
}

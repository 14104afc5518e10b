//! Points balance.
//!
//! Check-ins credit points, streak protectors debit them. The balance is kept
//! as a decimal string under [`keys::POINTS`].

use tracing::{info, warn};

use crate::error::{CoreError, Result};
use crate::storage::{keys, KeyValueStore};

/// Integer point balance over a [`KeyValueStore`].
pub struct PointsLedger<S> {
    store: S,
}

impl<S: KeyValueStore> PointsLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current balance; 0 when nothing has been stored yet.
    ///
    /// # Errors
    /// Returns an error if the store fails or the stored value is not a number.
    pub fn balance(&self) -> Result<u64> {
        match self.store.get(keys::POINTS)? {
            None => Ok(0),
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                warn!(value = %raw, "stored points balance is not a number");
                CoreError::Store {
                    key: keys::POINTS.to_string(),
                    message: e.to_string(),
                }
            }),
        }
    }

    /// Overwrite the balance.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn set_balance(&self, points: u64) -> Result<()> {
        self.store.set(keys::POINTS, &points.to_string())
    }

    /// Add points and return the new balance.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub fn credit(&self, amount: u64) -> Result<u64> {
        let balance = self.balance()?.saturating_add(amount);
        self.set_balance(balance)?;
        info!(amount, balance, "credited points");
        Ok(balance)
    }

    /// Remove points and return the new balance.
    ///
    /// # Errors
    /// Returns [`CoreError::InsufficientPoints`] without touching the balance
    /// when it is lower than `amount`.
    pub fn debit(&self, amount: u64) -> Result<u64> {
        let available = self.balance()?;
        if available < amount {
            warn!(amount, available, "refused debit");
            return Err(CoreError::InsufficientPoints {
                required: amount,
                available,
            });
        }
        let balance = available - amount;
        self.set_balance(balance)?;
        info!(amount, balance, "debited points");
        Ok(balance)
    }
}

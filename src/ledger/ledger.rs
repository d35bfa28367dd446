// File: src/ledger/ledger.rs
// Project: Coffer
// Creation date: Tuesday 18 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 28 February 2025 @ 15:49:40
// Modified by: Vincent Berthier
// -----
// Copyright (c) 2025 <Vincent Berthier>
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the 'Software'), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED 'AS IS', WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use tracing::{debug, instrument, warn};

use crate::{
    amount::{self, Currency, CurrencyCode, Rejected},
    vault::{AnyVault, Vault, VaultId},
};

use super::{
    staging::{Staging, State},
    Batch, Error, Result,
};

/// What an instruction produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A vault was created.
    Created(VaultId),
    /// Value was minted into a vault.
    Minted {
        /// The credited vault.
        vault: VaultId,
        /// Its balance after the mint.
        balance: u64,
    },
    /// Value moved between vaults.
    Transferred {
        /// The debited vault.
        from: VaultId,
        /// The credited vault.
        to: VaultId,
        /// The quantity moved.
        quantity: u64,
    },
    /// The balance of a vault.
    Balance {
        /// The vault that was read.
        vault: VaultId,
        /// Its balance.
        value: u64,
    },
}

/// A registry of vaults of any currency.
///
/// Vaults are addressed by their identifier, and only ever modified by
/// batches: either every instruction of a batch is applied, or none is.
#[derive(Debug, Default)]
pub struct Ledger {
    state: State,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a batch to the ledger.
    ///
    /// # Parameters
    /// * `batch` - The instructions to apply.
    ///
    /// # Returns
    /// The outcome of each instruction, in order.
    ///
    /// # Errors
    /// If any instruction fails, in which case the ledger is left untouched
    /// and the error tells which instruction failed.
    ///
    /// # Example
    /// ```rust
    /// # use coffer::{Error, amount::Usd, ledger::{Batch, Instruction, Ledger}, vault::Owner};
    /// let mut ledger = Ledger::new();
    /// let mut batch = Batch::new();
    /// let a = batch.add(Instruction::create_vault::<Usd>(Owner::from_bytes(&[1; 32])));
    /// let b = batch.add(Instruction::create_vault::<Usd>(Owner::from_bytes(&[2; 32])));
    /// batch.add(Instruction::mint_into(a, 1_000));
    /// batch.add(Instruction::transfer(a, b, 1_001));
    ///
    /// assert!(ledger.execute(&batch).is_err());
    /// assert!(ledger.is_empty());
    /// # Ok::<(), Error>(())
    /// ```
    #[instrument(skip_all, fields(batch = %batch.id(), len = batch.len()))]
    pub fn execute(&mut self, batch: &Batch) -> Result<Vec<Outcome>> {
        debug!("executing batch");
        let mut staging = Staging::new(&self.state);
        let mut outcomes = Vec::with_capacity(batch.len());
        for (index, instruction) in batch.instructions().iter().enumerate() {
            let outcome = staging.apply(instruction).map_err(|source| {
                warn!(index, %source, "instruction failed, discarding the batch");
                Error::Aborted {
                    index,
                    source: Box::new(source),
                }
            })?;
            outcomes.push(outcome);
        }

        let (vaults, supplies) = staging.into_changes();
        debug!(vaults = vaults.len(), "committing batch");
        self.state.vaults.extend(vaults);
        self.state.supplies.extend(supplies);

        Ok(outcomes)
    }

    /// Registers an existing vault in the ledger.
    ///
    /// # Errors
    /// If a vault with the same identifier is already registered, or if
    /// the ledger's supply of the currency would overflow. The vault is
    /// handed back in both cases.
    #[instrument(skip_all, fields(id = %vault.id(), currency = C::CODE))]
    pub fn insert<C: Currency>(
        &mut self,
        vault: Vault<C>,
    ) -> core::result::Result<VaultId, Rejected<Vault<C>, Error>> {
        debug!("registering vault");
        let id = *vault.id();
        if self.state.vaults.contains_key(&id) {
            warn!("vault is already registered");
            return Err(Rejected::new(Error::DuplicateVault { id }, vault));
        }
        let code = C::code();
        let current = self.supply(&code);
        let Some(supply) = current.checked_add(vault.balance_of()) else {
            warn!("the supply would overflow");
            return Err(Rejected::new(Error::Amount(amount::Error::Overflow), vault));
        };
        self.state.supplies.insert(code, supply);
        self.state.vaults.insert(id, vault.into());

        Ok(id)
    }

    /// Takes a vault out of the ledger.
    ///
    /// # Errors
    /// If no vault is registered under `id`, or if it doesn't hold the
    /// currency `C` (in which case it stays in the ledger).
    #[instrument(skip(self), fields(currency = C::CODE))]
    pub fn take<C: Currency>(&mut self, id: &VaultId) -> Result<Vault<C>> {
        debug!("unregistering vault");
        let vault = self
            .state
            .vaults
            .remove(id)
            .ok_or(Error::UnknownVault { id: *id })?;
        match vault.into_typed::<C>() {
            Ok(vault) => {
                if let Some(supply) = self.state.supplies.get_mut(&C::code()) {
                    *supply = supply.saturating_sub(vault.balance_of());
                }
                Ok(vault)
            }
            Err(vault) => {
                let actual = vault.currency().clone();
                self.state.vaults.insert(*id, vault);
                warn!(%actual, "vault holds another currency");
                Err(amount::Error::DenominationMismatch {
                    expected: C::code(),
                    actual,
                }
                .into())
            }
        }
    }

    /// Get a registered vault.
    #[must_use]
    pub fn vault(&self, id: &VaultId) -> Option<&AnyVault> {
        self.state.vaults.get(id)
    }

    /// Get the balance of a registered vault.
    ///
    /// # Errors
    /// If no vault is registered under `id`.
    pub fn balance_of(&self, id: &VaultId) -> Result<u64> {
        self.vault(id)
            .map(AnyVault::balance_of)
            .ok_or(Error::UnknownVault { id: *id })
    }

    /// Get the total value of a currency held in the ledger.
    ///
    /// It is the sum of everything minted into or brought in the ledger,
    /// minus what was taken out with [`Ledger::take`].
    #[must_use]
    pub fn supply(&self, currency: &CurrencyCode) -> u64 {
        self.state.supplies.get(currency).copied().unwrap_or_default()
    }

    /// Get the sum of the balances of the vaults holding a currency.
    ///
    /// It always equals [`Ledger::supply`]: transfers only move value around.
    #[must_use]
    pub fn holdings(&self, currency: &CurrencyCode) -> u64 {
        self.state
            .vaults
            .values()
            .filter(|vault| vault.currency() == currency)
            .map(AnyVault::balance_of)
            .fold(0, u64::saturating_add)
    }

    /// Get the number of registered vaults.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.vaults.len()
    }

    /// Checks whether no vault is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.vaults.is_empty()
    }
}

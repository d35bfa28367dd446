// File: src/ledger/staging.rs
// Project: Coffer
// Creation date: Friday 28 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Wednesday 05 March 2025 @ 17:37:26
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

use std::collections::{hash_map::Entry, HashMap};

use tracing::{debug, instrument, trace, warn};

use crate::{
    amount::{self, CurrencyCode},
    vault::{AnyVault, VaultId},
};

use super::{ledger::Outcome, Error, Instruction, Result, VaultRef};

/// The committed content of a ledger.
#[derive(Debug, Default)]
pub(super) struct State {
    /// Registered vaults.
    pub vaults: HashMap<VaultId, AnyVault>,
    /// Value held in the ledger's vaults, per currency.
    pub supplies: HashMap<CurrencyCode, u64>,
}

/// Changes made by a batch, not yet visible in the ledger.
///
/// Vaults are copied out of the committed state the first time an
/// instruction touches them, so a failing batch only has to be dropped.
pub(super) struct Staging<'a> {
    committed: &'a State,
    vaults: HashMap<VaultId, AnyVault>,
    supplies: HashMap<CurrencyCode, u64>,
    /// Vault created by each instruction run so far, if any.
    created: Vec<Option<VaultId>>,
}

impl<'a> Staging<'a> {
    pub fn new(committed: &'a State) -> Self {
        Self {
            committed,
            vaults: HashMap::new(),
            supplies: HashMap::new(),
            created: Vec::new(),
        }
    }

    #[instrument(skip(self))]
    pub fn apply(&mut self, instruction: &Instruction) -> Result<Outcome> {
        debug!("applying instruction");
        let outcome = match instruction {
            Instruction::CreateVault { owner, currency } => {
                let vault = AnyVault::create(*owner, currency.clone());
                let id = *vault.id();
                self.vaults.insert(id, vault);
                Outcome::Created(id)
            }
            Instruction::MintInto { vault, quantity } => {
                let id = self.resolve(*vault)?;
                self.mint_into(id, *quantity)?
            }
            Instruction::Transfer { from, to, quantity } => {
                let from = self.resolve(*from)?;
                let to = self.resolve(*to)?;
                self.transfer(from, to, *quantity)?
            }
            Instruction::BalanceOf { vault } => {
                let id = self.resolve(*vault)?;
                Outcome::Balance {
                    vault: id,
                    value: self.load(id)?.balance_of(),
                }
            }
        };
        self.created.push(match outcome {
            Outcome::Created(id) => Some(id),
            _ => None,
        });

        Ok(outcome)
    }

    fn resolve(&self, vault: VaultRef) -> Result<VaultId> {
        match vault {
            VaultRef::Id(id) => Ok(id),
            VaultRef::Created(index) => self
                .created
                .get(index as usize)
                .copied()
                .flatten()
                .ok_or(Error::UnresolvedReference { index }),
        }
    }

    /// Get a vault, copying it from the committed state on first access.
    fn load(&mut self, id: VaultId) -> Result<&mut AnyVault> {
        match self.vaults.entry(id) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                trace!(%id, "staging committed vault");
                let vault = self
                    .committed
                    .vaults
                    .get(&id)
                    .ok_or(Error::UnknownVault { id })?;
                Ok(entry.insert(vault.checkpoint()))
            }
        }
    }

    fn supply_mut(&mut self, currency: &CurrencyCode) -> &mut u64 {
        let committed = self.committed.supplies.get(currency).copied();
        self.supplies
            .entry(currency.clone())
            .or_insert_with(|| committed.unwrap_or_default())
    }

    #[instrument(skip(self))]
    fn mint_into(&mut self, id: VaultId, quantity: u64) -> Result<Outcome> {
        let currency = self.load(id)?.currency().clone();
        let supply = self.supply_mut(&currency);
        *supply = supply.checked_add(quantity).ok_or_else(|| {
            warn!(%currency, "the supply would overflow");
            amount::Error::Overflow
        })?;
        let vault = self.load(id)?;
        vault.mint_into(quantity)?;

        Ok(Outcome::Minted {
            vault: id,
            balance: vault.balance_of(),
        })
    }

    #[instrument(skip(self))]
    fn transfer(&mut self, from: VaultId, to: VaultId, quantity: u64) -> Result<Outcome> {
        self.load(to)?;
        let source = self.load(from)?;
        if from == to {
            trace!("transfer to self");
            if source.balance_of() < quantity {
                return Err(amount::Error::InsufficientValue {
                    available: source.balance_of(),
                    requested: quantity,
                }
                .into());
            }
            return Ok(Outcome::Transferred { from, to, quantity });
        }

        let mut source = self.vaults.remove(&from).ok_or(Error::UnknownVault { id: from })?;
        let res = self
            .vaults
            .get_mut(&to)
            .ok_or(Error::UnknownVault { id: to })
            .and_then(|destination| source.transfer(destination, quantity).map_err(Error::from));
        self.vaults.insert(from, source);
        res?;

        Ok(Outcome::Transferred { from, to, quantity })
    }

    /// Get the vaults and supplies touched by the batch.
    pub fn into_changes(self) -> (HashMap<VaultId, AnyVault>, HashMap<CurrencyCode, u64>) {
        (self.vaults, self.supplies)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {

    use test_log::test;

    use crate::{
        amount::{Currency, Usd},
        vault::Owner,
    };

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    #[test]
    fn staged_changes_leave_committed_state_untouched() -> TestResult {
        // Given
        let mut state = State::default();
        let vault = AnyVault::create(Owner::from_bytes(&[1; 32]), Usd::code());
        let id = *vault.id();
        state.vaults.insert(id, vault);
        let mut staging = Staging::new(&state);

        // When
        staging.apply(&Instruction::mint_into(id, 10))?;

        // Then
        assert_eq!(state.vaults[&id].balance_of(), 0);
        let (vaults, supplies) = staging.into_changes();
        assert_eq!(vaults[&id].balance_of(), 10);
        assert_eq!(supplies[&Usd::code()], 10);
        Ok(())
    }

    #[test]
    fn references_must_point_to_earlier_creations() -> TestResult {
        // Given
        let state = State::default();
        let mut staging = Staging::new(&state);
        staging.apply(&Instruction::create_vault::<Usd>(Owner::from_bytes(&[1; 32])))?;

        // When
        let forward = staging.apply(&Instruction::balance_of(VaultRef::Created(5)));
        let not_a_creation = staging.apply(&Instruction::balance_of(VaultRef::Created(1)));

        // Then
        assert!(matches!(forward, Err(Error::UnresolvedReference { index: 5 })));
        assert!(matches!(
            not_a_creation,
            Err(Error::UnresolvedReference { index: 1 })
        ));
        Ok(())
    }
}

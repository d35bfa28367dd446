// File: src/vault/any.rs
// Project: Coffer
// Creation date: Wednesday 12 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Tuesday 18 February 2025 @ 11:01:18
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

use crate::amount::{Currency, CurrencyCode, TaggedAmount};

use super::{Owner, Result, Vault, VaultId};

/// A vault whose currency is only checked at runtime.
///
/// This is how the ledger stores vaults of every currency side by side.
/// Operations mixing two vaults check that their currencies match before
/// any balance is modified.
#[derive(Debug)]
pub struct AnyVault {
    /// Unique identifier of the vault.
    id: VaultId,
    /// The vault's owner.
    owner: Owner,
    /// What the vault holds.
    balance: TaggedAmount,
}

impl AnyVault {
    /// Creates an empty vault of the given currency.
    #[instrument]
    pub fn create(owner: Owner, currency: CurrencyCode) -> Self {
        let id = VaultId::next(&owner, &currency);
        debug!(%id, "creating vault");
        Self {
            id,
            owner,
            balance: TaggedAmount::zero(currency),
        }
    }

    /// Get the vault's identifier.
    #[must_use]
    pub const fn id(&self) -> &VaultId {
        &self.id
    }

    /// Get the vault's owner.
    #[must_use]
    pub const fn owner(&self) -> &Owner {
        &self.owner
    }

    /// Get the vault's currency.
    #[must_use]
    pub const fn currency(&self) -> &CurrencyCode {
        self.balance.currency()
    }

    /// Get the value held by the vault.
    #[must_use]
    pub const fn balance_of(&self) -> u64 {
        self.balance.value()
    }

    /// Mints new value of the vault's currency directly into it.
    ///
    /// # Errors
    /// If the balance would overflow.
    #[instrument(skip(self), fields(id = %self.id, currency = %self.currency()))]
    pub fn mint_into(&mut self, quantity: u64) -> Result<()> {
        debug!("minting into vault");
        let minted = TaggedAmount::mint(self.currency().clone(), quantity);
        self.balance.join(minted).map_err(|refused| refused.error)?;

        Ok(())
    }

    /// Moves value from this vault into another one.
    ///
    /// Either both vaults are updated, or neither is.
    ///
    /// # Errors
    /// If the vaults hold different currencies, if this vault holds less than
    /// `quantity`, or if the destination's balance would overflow.
    #[instrument(skip(self, destination), fields(from = %self.id, to = %destination.id))]
    pub fn transfer(&mut self, destination: &mut Self, quantity: u64) -> Result<()> {
        debug!("transferring between vaults");
        destination.balance.check_currency(self.currency())?;
        let moved = self.balance.split(quantity)?;
        if let Err(refused) = destination.balance.join(moved) {
            warn!("the destination refused the value, restoring the source");
            self.balance
                .join(refused.amount)
                .map_err(|restored| restored.error)?;
            return Err(refused.error.into());
        }

        Ok(())
    }

    /// Converts back into a vault tagged at the type level.
    ///
    /// # Errors
    /// The vault is handed back if its currency isn't `C`.
    ///
    /// # Example
    /// ```rust
    /// # use coffer::{amount::{Eur, Usd}, vault::{AnyVault, Owner, Vault}};
    /// let vault = AnyVault::from(Vault::<Usd>::create(Owner::from_bytes(&[1; 32])));
    /// let vault = vault.into_typed::<Eur>().unwrap_err();
    /// assert!(vault.into_typed::<Usd>().is_ok());
    /// ```
    pub fn into_typed<C: Currency>(self) -> core::result::Result<Vault<C>, Self> {
        let Self { id, owner, balance } = self;
        match balance.into_typed::<C>() {
            Ok(balance) => Ok(Vault::from_parts(id, owner, balance)),
            Err(balance) => Err(Self { id, owner, balance }),
        }
    }

    /// Copies the vault, so that a batch can work on it and be discarded.
    pub(crate) fn checkpoint(&self) -> Self {
        Self {
            id: self.id,
            owner: self.owner,
            balance: self.balance.checkpoint(),
        }
    }
}

impl<C: Currency> From<Vault<C>> for AnyVault {
    fn from(value: Vault<C>) -> Self {
        let (id, owner, balance) = value.into_parts();
        Self {
            id,
            owner,
            balance: balance.into(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {

    use test_log::test;

    use crate::amount::{self, Eur, Usd};

    use super::super::Error;
    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    #[test]
    fn transfer_between_same_currency() -> TestResult {
        // Given
        let mut a = AnyVault::create(Owner::from_bytes(&[1; 32]), Usd::code());
        let mut b = AnyVault::create(Owner::from_bytes(&[2; 32]), Usd::code());
        a.mint_into(500)?;

        // When
        a.transfer(&mut b, 100)?;
        a.transfer(&mut b, 50)?;

        // Then
        assert_eq!(a.balance_of(), 350);
        assert_eq!(b.balance_of(), 150);
        Ok(())
    }

    #[test]
    fn reject_transfers_across_currencies() -> TestResult {
        // Given
        let mut dollars = AnyVault::create(Owner::from_bytes(&[1; 32]), Usd::code());
        let mut euros = AnyVault::create(Owner::from_bytes(&[2; 32]), Eur::code());
        dollars.mint_into(100)?;

        // When
        let res = dollars.transfer(&mut euros, 10);

        // Then
        assert!(matches!(
            res,
            Err(Error::Amount(amount::Error::DenominationMismatch { .. }))
        ));
        assert_eq!(dollars.balance_of(), 100);
        assert_eq!(euros.balance_of(), 0);
        Ok(())
    }

    #[test]
    fn overflowing_transfers_restore_the_source() -> TestResult {
        // Given
        let mut a = AnyVault::create(Owner::from_bytes(&[1; 32]), Usd::code());
        let mut b = AnyVault::create(Owner::from_bytes(&[2; 32]), Usd::code());
        a.mint_into(10)?;
        b.mint_into(u64::MAX - 5)?;

        // When
        let res = a.transfer(&mut b, 6);

        // Then
        assert!(matches!(res, Err(Error::Amount(amount::Error::Overflow))));
        assert_eq!(a.balance_of(), 10);
        assert_eq!(b.balance_of(), u64::MAX - 5);
        Ok(())
    }

    #[test]
    fn typed_round_trip_keeps_identity_and_balance() -> TestResult {
        // Given
        let mut typed = Vault::<Eur>::create(Owner::from_bytes(&[4; 32]));
        typed.mint_into(64)?;
        let id = *typed.id();

        // When
        let any = AnyVault::from(typed);
        let Ok(back) = any.into_typed::<Eur>() else {
            return Err("euro vault rejected as euros".into());
        };

        // Then
        assert_eq!(back.id(), &id);
        assert_eq!(back.balance_of(), 64);
        Ok(())
    }
}

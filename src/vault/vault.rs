// File: src/vault/vault.rs
// Project: Coffer
// Creation date: Tuesday 11 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Saturday 15 February 2025 @ 09:04:06
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

use std::fmt::{Debug, Formatter};

use tracing::{debug, instrument, warn};

use crate::amount::{mint, Amount, Currency, JoinResult};

use super::{Owner, Result, VaultId};

/// A vault holding an amount of the currency `C`.
///
/// The currency of a vault is part of its type, so it can only ever hold,
/// receive or send amounts of that currency.
pub struct Vault<C: Currency> {
    /// Unique identifier of the vault.
    id: VaultId,
    /// The vault's owner.
    owner: Owner,
    /// What the vault holds.
    balance: Amount<C>,
}

impl<C: Currency> Vault<C> {
    /// Creates an empty vault.
    ///
    /// # Parameters
    /// * `owner` - The owner of the vault.
    ///
    /// # Example
    /// ```rust
    /// # use coffer::{amount::Usd, vault::{Owner, Vault}};
    /// let owner = Owner::from_bytes(&[1; 32]);
    /// let vault = Vault::<Usd>::create(owner);
    /// assert_eq!(vault.balance_of(), 0);
    /// assert_eq!(vault.owner(), &owner);
    /// ```
    #[instrument(fields(currency = C::CODE))]
    pub fn create(owner: Owner) -> Self {
        let id = VaultId::next(&owner, &C::code());
        debug!(%id, "creating vault");
        Self {
            id,
            owner,
            balance: Amount::zero(),
        }
    }

    pub(crate) const fn from_parts(id: VaultId, owner: Owner, balance: Amount<C>) -> Self {
        Self { id, owner, balance }
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

    /// Get the value held by the vault.
    #[must_use]
    pub const fn balance_of(&self) -> u64 {
        self.balance.value()
    }

    /// Mints new value directly into the vault.
    ///
    /// # Errors
    /// If the balance would overflow.
    #[instrument(skip(self), fields(id = %self.id, currency = C::CODE))]
    pub fn mint_into(&mut self, quantity: u64) -> Result<()> {
        debug!("minting into vault");
        self.balance
            .join(mint(quantity))
            .map_err(|refused| refused.error)?;

        Ok(())
    }

    /// Puts an amount into the vault.
    ///
    /// # Errors
    /// If the balance would overflow, in which case the amount is handed back.
    ///
    /// # Example
    /// ```rust
    /// # use coffer::{amount::{mint, Usd}, vault::{Owner, Vault}};
    /// let mut vault = Vault::<Usd>::create(Owner::from_bytes(&[1; 32]));
    /// vault.mint_into(u64::MAX)?;
    /// let refused = vault.deposit(mint(5)).unwrap_err();
    /// assert_eq!(refused.amount.value(), 5);
    /// # Ok::<(), coffer::vault::Error>(())
    /// ```
    #[instrument(skip_all, fields(id = %self.id, currency = C::CODE, value = amount.value()))]
    pub fn deposit(&mut self, amount: Amount<C>) -> JoinResult<Amount<C>> {
        debug!("depositing into vault");
        self.balance.join(amount)
    }

    /// Takes an amount out of the vault.
    ///
    /// # Errors
    /// If the vault holds less than `quantity`.
    #[instrument(skip(self), fields(id = %self.id, currency = C::CODE))]
    pub fn withdraw(&mut self, quantity: u64) -> Result<Amount<C>> {
        debug!("withdrawing from vault");
        Ok(self.balance.split(quantity)?)
    }

    /// Moves value from this vault into another one.
    ///
    /// Either both vaults are updated, or neither is.
    ///
    /// # Parameters
    /// * `destination` - The vault receiving the value,
    /// * `quantity` - The quantity to move.
    ///
    /// # Errors
    /// If this vault holds less than `quantity`, or if the destination's
    /// balance would overflow.
    ///
    /// # Example
    /// ```rust
    /// # use coffer::{Error, amount::Usd, vault::{Owner, Vault}};
    /// let mut alice = Vault::<Usd>::create(Owner::from_bytes(&[1; 32]));
    /// let mut bob = Vault::<Usd>::create(Owner::from_bytes(&[2; 32]));
    /// alice.mint_into(1_000)?;
    /// alice.transfer(&mut bob, 250)?;
    /// assert_eq!(alice.balance_of(), 750);
    /// assert_eq!(bob.balance_of(), 250);
    /// # Ok::<(), Error>(())
    /// ```
    #[instrument(skip(self, destination), fields(from = %self.id, to = %destination.id, currency = C::CODE))]
    pub fn transfer(&mut self, destination: &mut Self, quantity: u64) -> Result<()> {
        debug!("transferring between vaults");
        let moved = self.balance.split(quantity)?;
        if let Err(refused) = destination.balance.join(moved) {
            warn!("the destination balance would overflow, restoring the source");
            self.balance
                .join(refused.amount)
                .map_err(|restored| restored.error)?;
            return Err(refused.error.into());
        }

        Ok(())
    }

    pub(crate) fn into_parts(self) -> (VaultId, Owner, Amount<C>) {
        (self.id, self.owner, self.balance)
    }
}

#[mutants::skip]
impl<C: Currency> Debug for Vault<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("balance", &self.balance)
            .finish()
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

    fn usd_vaults() -> (Vault<Usd>, Vault<Usd>) {
        (
            Vault::create(Owner::from_bytes(&[1; 32])),
            Vault::create(Owner::from_bytes(&[2; 32])),
        )
    }

    #[test]
    fn minting_only_credits_the_target_vault() -> TestResult {
        // Given
        let (mut a, b) = usd_vaults();

        // When
        a.mint_into(1_000)?;

        // Then
        assert_eq!(a.balance_of(), 1_000);
        assert_eq!(b.balance_of(), 0);
        assert_ne!(a.id(), b.id());
        Ok(())
    }

    #[test]
    fn transfer_moves_value() -> TestResult {
        // Given
        let (mut a, mut b) = usd_vaults();
        a.mint_into(1_000)?;

        // When
        a.transfer(&mut b, 250)?;

        // Then
        assert_eq!(a.balance_of(), 750);
        assert_eq!(b.balance_of(), 250);
        Ok(())
    }

    #[test]
    fn transfer_from_empty_vault_fails() {
        // Given
        let (mut a, mut b) = usd_vaults();

        // When
        let res = a.transfer(&mut b, 1);

        // Then
        assert!(matches!(
            res,
            Err(Error::Amount(amount::Error::InsufficientValue { .. }))
        ));
        assert_eq!(a.balance_of(), 0);
        assert_eq!(b.balance_of(), 0);
    }

    #[test]
    fn transfer_is_all_or_nothing() -> TestResult {
        // Given
        let (mut a, mut b) = usd_vaults();
        a.mint_into(500)?;
        b.mint_into(u64::MAX - 100)?;

        // When
        let too_much = a.transfer(&mut b, 501);
        let overflowing = a.transfer(&mut b, 101);

        // Then
        assert!(matches!(
            too_much,
            Err(Error::Amount(amount::Error::InsufficientValue {
                available: 500,
                requested: 501
            }))
        ));
        assert!(matches!(
            overflowing,
            Err(Error::Amount(amount::Error::Overflow))
        ));
        assert_eq!(a.balance_of(), 500);
        assert_eq!(b.balance_of(), u64::MAX - 100);
        Ok(())
    }

    #[test]
    fn withdraw_then_deposit_elsewhere() -> TestResult {
        // Given
        let mut dollars = Vault::<Usd>::create(Owner::from_bytes(&[3; 32]));
        let mut euros = Vault::<Eur>::create(Owner::from_bytes(&[3; 32]));
        dollars.mint_into(80)?;
        euros.mint_into(20)?;
        let (_, mut savings) = usd_vaults();

        // When
        savings.deposit(dollars.withdraw(30)?)?;

        // Then
        assert_eq!(dollars.balance_of(), 50);
        assert_eq!(savings.balance_of(), 30);
        assert_eq!(euros.balance_of(), 20);
        Ok(())
    }

    #[test]
    fn refused_deposits_give_the_amount_back() -> TestResult {
        // Given
        let (mut a, mut b) = usd_vaults();
        a.mint_into(40)?;
        b.mint_into(u64::MAX)?;

        // When
        let res = b.deposit(a.withdraw(40)?);
        let Err(refused) = res else {
            return Err("deposit past u64::MAX".into());
        };
        a.deposit(refused.amount)?;

        // Then
        assert!(matches!(refused.error, amount::Error::Overflow));
        assert_eq!(a.balance_of(), 40);
        assert_eq!(b.balance_of(), u64::MAX);
        Ok(())
    }

    #[test]
    fn balance_queries_are_idempotent() -> TestResult {
        // Given
        let (mut a, _) = usd_vaults();
        a.mint_into(12)?;

        // Then
        let first = a.balance_of();
        assert!((0..10).all(|_| a.balance_of() == first));
        Ok(())
    }
}

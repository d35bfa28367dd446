// File: src/ledger/instruction.rs
// Project: Coffer
// Creation date: Thursday 13 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Thursday 13 February 2025 @ 11:31:13
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

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    amount::{Currency, CurrencyCode},
    vault::{Owner, VaultId},
};

/// How an instruction designates a vault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum VaultRef {
    /// A vault already registered in the ledger.
    Id(VaultId),
    /// The vault created by the instruction at that position in the same batch.
    Created(u32),
}

impl From<VaultId> for VaultRef {
    fn from(value: VaultId) -> Self {
        Self::Id(value)
    }
}

/// An operation on the ledger.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum Instruction {
    /// Creates an empty vault.
    CreateVault {
        /// Owner of the new vault.
        owner: Owner,
        /// Currency the vault holds.
        currency: CurrencyCode,
    },
    /// Mints value into a vault.
    MintInto {
        /// The credited vault.
        vault: VaultRef,
        /// Quantity to mint.
        quantity: u64,
    },
    /// Moves value between two vaults of the same currency.
    Transfer {
        /// The debited vault.
        from: VaultRef,
        /// The credited vault.
        to: VaultRef,
        /// Quantity to move.
        quantity: u64,
    },
    /// Reads the balance of a vault.
    BalanceOf {
        /// The vault to read.
        vault: VaultRef,
    },
}

impl Instruction {
    /// Vault creation instruction.
    ///
    /// # Parameters
    /// * `owner` - The owner of the vault.
    #[must_use]
    pub fn create_vault<C: Currency>(owner: Owner) -> Self {
        Self::CreateVault {
            owner,
            currency: C::code(),
        }
    }

    /// Minting instruction.
    ///
    /// # Parameters
    /// * `vault` - The vault receiving the minted value,
    /// * `quantity` - The quantity to mint.
    #[must_use]
    pub fn mint_into<V>(vault: V, quantity: u64) -> Self
    where
        V: Into<VaultRef>,
    {
        Self::MintInto {
            vault: vault.into(),
            quantity,
        }
    }

    /// Transfer instruction.
    ///
    /// # Parameters
    /// * `from` - The vault the value is taken from,
    /// * `to` - The vault receiving the value,
    /// * `quantity` - The quantity to move.
    #[must_use]
    pub fn transfer<F, T>(from: F, to: T, quantity: u64) -> Self
    where
        F: Into<VaultRef>,
        T: Into<VaultRef>,
    {
        Self::Transfer {
            from: from.into(),
            to: to.into(),
            quantity,
        }
    }

    /// Balance query instruction.
    #[must_use]
    pub fn balance_of<V>(vault: V) -> Self
    where
        V: Into<VaultRef>,
    {
        Self::BalanceOf {
            vault: vault.into(),
        }
    }
}

// File: src/ledger/error.rs
// Project: Coffer
// Creation date: Friday 28 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 07 March 2025 @ 11:56:23
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

use derive_more::derive::{Display, From};

use crate::vault::VaultId;

/// Errors of the ledger module.
#[derive(Debug, Display, From)]
#[display("while running a batch: {_variant}")]
pub enum Error {
    /// No vault is registered under that identifier.
    #[display("unknown vault '{id}'")]
    UnknownVault {
        /// Identifier that was looked up.
        id: VaultId,
    },
    /// A vault was referenced through an instruction that didn't create one
    /// (or that hasn't run yet).
    #[display("instruction #{index} did not create a vault")]
    UnresolvedReference {
        /// Position of the referenced instruction in the batch.
        index: u32,
    },
    /// A vault with the same identifier is already registered.
    #[display("vault '{id}' is already registered")]
    DuplicateVault {
        /// Identifier of the vault.
        id: VaultId,
    },
    /// An instruction failed, so none of the batch was applied.
    #[display("instruction #{index} failed: {source}")]
    Aborted {
        /// Position of the failing instruction in the batch.
        index: usize,
        /// Why it failed.
        source: Box<Error>,
    },
    /// The batch couldn't be decoded.
    #[display("malformed batch: {_0}")]
    #[from]
    Decoding(std::io::Error),
    /// An operation on a vault failed.
    #[display("{_0}")]
    #[from]
    Vault(crate::vault::Error),
    /// An operation on an amount failed.
    #[display("{_0}")]
    #[from]
    Amount(crate::amount::Error),
}

impl Error {
    /// Get the error at the origin of an aborted batch.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Aborted { source, .. } => source.root_cause(),
            err => err,
        }
    }

    /// Get the amount error at the origin of the failure, if any.
    #[must_use]
    pub fn amount_error(&self) -> Option<&crate::amount::Error> {
        match self {
            Self::Aborted { source, .. } => source.amount_error(),
            Self::Vault(crate::vault::Error::Amount(err)) | Self::Amount(err) => Some(err),
            _ => None,
        }
    }
}

impl core::error::Error for Error {}

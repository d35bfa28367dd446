// File: src/vault/id.rs
// Project: Coffer
// Creation date: Saturday 01 March 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Saturday 01 March 2025 @ 15:45:37
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

use std::sync::atomic::{AtomicU64, Ordering};

use sha2::{Digest as _, Sha256};
use tracing::{instrument, trace};

use crate::{amount::CurrencyCode, key::base58_key};

/// Number of vault identifiers handed out so far.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

base58_key!(
    /// The identity owning a vault.
    ///
    /// The ledger doesn't interpret it: it's whatever token the caller uses
    /// to recognize its users.
    Owner
);

base58_key!(
    /// The unique identifier of a vault.
    VaultId
);

impl VaultId {
    /// Derives a fresh identifier for a vault.
    ///
    /// The identifier is the hash of the owner, the currency and a sequence
    /// number, so no two vaults created by the same process share one.
    #[expect(clippy::little_endian_bytes)]
    #[instrument(skip_all, fields(%owner, %currency))]
    pub(crate) fn next(owner: &Owner, currency: &CurrencyCode) -> Self {
        let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        trace!(sequence, "deriving vault id");
        let mut hasher = Sha256::new();
        hasher.update(owner);
        hasher.update(currency.as_str());
        hasher.update(currency.marker());
        hasher.update(sequence.to_le_bytes());

        Self {
            bytes: hasher.finalize().into(),
        }
    }
}

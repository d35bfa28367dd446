// File: src/ledger/batch.rs
// Project: Coffer
// Creation date: Saturday 22 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 28 February 2025 @ 15:46:51
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
use sha2::{Digest as _, Sha256};
use tracing::{debug, instrument};

use crate::key::base58_key;

use super::{Instruction, Result, VaultRef};

base58_key!(
    /// Identifier of a batch: the hash of its encoding.
    BatchId
);

/// An ordered list of instructions, applied all at once or not at all.
#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Batch {
    /// The instructions, in execution order.
    instructions: Vec<Instruction>,
}

impl Batch {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            instructions: Vec::new(),
        }
    }

    /// Appends an instruction to the batch.
    ///
    /// # Returns
    /// A reference to the vault the instruction creates, meaningful only
    /// for [`Instruction::CreateVault`].
    ///
    /// # Example
    /// ```rust
    /// # use coffer::{amount::Usd, ledger::{Batch, Instruction}, vault::Owner};
    /// let mut batch = Batch::new();
    /// let vault = batch.add(Instruction::create_vault::<Usd>(Owner::from_bytes(&[1; 32])));
    /// batch.add(Instruction::mint_into(vault, 1_000));
    /// assert_eq!(batch.len(), 2);
    /// ```
    #[expect(clippy::cast_possible_truncation)]
    pub fn add(&mut self, instruction: Instruction) -> VaultRef {
        let index = self.instructions.len() as u32;
        self.instructions.push(instruction);

        VaultRef::Created(index)
    }

    /// Get the batch's instructions.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the number of instructions in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Checks whether the batch has no instruction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Encodes the batch.
    #[expect(clippy::unwrap_used, reason = "encoding in memory can't fail")]
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap()
    }

    /// Decodes a batch.
    ///
    /// # Errors
    /// If `bytes` isn't a valid batch encoding.
    #[instrument(skip_all, fields(len = bytes.len()))]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        debug!("decoding batch");
        Ok(borsh::from_slice(bytes)?)
    }

    /// Get the batch's identifier.
    #[must_use]
    pub fn id(&self) -> BatchId {
        let hash = Sha256::digest(self.to_bytes());
        BatchId {
            bytes: hash.into(),
        }
    }
}

impl FromIterator<Instruction> for Batch {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        Self {
            instructions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {

    use test_log::test;

    use crate::{amount::Usd, vault::Owner};

    use super::super::Error;
    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    fn sample() -> Batch {
        let mut batch = Batch::new();
        let a = batch.add(Instruction::create_vault::<Usd>(Owner::from_bytes(&[1; 32])));
        let b = batch.add(Instruction::create_vault::<Usd>(Owner::from_bytes(&[2; 32])));
        batch.add(Instruction::mint_into(a, 1_000));
        batch.add(Instruction::transfer(a, b, 250));
        batch
    }

    #[test]
    fn add_references_created_vaults_by_position() {
        // When
        let batch = sample();

        // Then
        assert_eq!(
            batch.instructions()[3],
            Instruction::transfer(VaultRef::Created(0), VaultRef::Created(1), 250)
        );
    }

    #[test]
    fn decode_encoded_batch() -> TestResult {
        // Given
        let batch = sample();

        // When
        let decoded = Batch::from_bytes(&batch.to_bytes())?;

        // Then
        assert_eq!(decoded, batch);
        assert_eq!(decoded.id(), batch.id());
        Ok(())
    }

    #[test]
    fn reject_truncated_batch() {
        // Given
        let bytes = sample().to_bytes();

        // When
        let res = Batch::from_bytes(&bytes[..bytes.len() - 3]);

        // Then
        assert!(matches!(res, Err(Error::Decoding(_))));
    }

    #[test]
    fn different_batches_have_different_ids() {
        // Given
        let batch = sample();
        let mut longer = sample();
        longer.add(Instruction::balance_of(VaultRef::Created(0)));

        // Then
        assert_ne!(batch.id(), longer.id());
    }
}

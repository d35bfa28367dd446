// File: src/processor/status.rs
// Project: Coffer
// Creation date: Monday 10 March 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Tuesday 11 March 2025 @ 10:41:17
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

use std::{
    collections::{HashMap, VecDeque},
    sync::atomic::{AtomicU64, Ordering},
};

use sha2::{Digest as _, Sha256};
use tracing::trace;

use crate::{key::base58_key, ledger::BatchId};

/// Number of submissions handed out so far.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

base58_key!(
    /// Identifier of one submission of a batch.
    ///
    /// Submitting the same batch twice gives two different identifiers.
    SubmissionId
);

impl SubmissionId {
    #[expect(clippy::little_endian_bytes)]
    pub(super) fn next(batch: &BatchId) -> Self {
        let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let mut hasher = Sha256::new();
        hasher.update(batch);
        hasher.update(sequence.to_le_bytes());

        Self {
            bytes: hasher.finalize().into(),
        }
    }
}

/// Where a submitted batch stands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    /// Rejected, nothing was applied.
    Failed,
    /// Waiting in the queue.
    #[default]
    Pending,
    /// Being applied.
    Running,
    /// Applied.
    Succeeded,
}

impl Status {
    /// Checks whether the batch is done with, successfully or not.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Failed | Self::Succeeded)
    }
}

/// Statuses of the submissions, remembering a bounded number of finished ones.
#[derive(Debug)]
pub(super) struct StatusBook {
    statuses: HashMap<SubmissionId, Status>,
    /// Finished submissions, oldest first.
    finished: VecDeque<SubmissionId>,
    history: usize,
}

impl StatusBook {
    pub fn new(history: usize) -> Self {
        Self {
            statuses: HashMap::new(),
            finished: VecDeque::new(),
            history,
        }
    }

    pub fn set(&mut self, id: SubmissionId, status: Status) {
        self.statuses.insert(id, status);
        if !status.is_finished() {
            return;
        }
        self.finished.push_back(id);
        while self.finished.len() > self.history {
            if let Some(oldest) = self.finished.pop_front() {
                trace!(%oldest, "forgetting finished submission");
                self.statuses.remove(&oldest);
            }
        }
    }

    pub fn get(&self, id: &SubmissionId) -> Option<Status> {
        self.statuses.get(id).copied()
    }

    pub fn forget(&mut self, id: &SubmissionId) {
        self.statuses.remove(id);
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {

    use test_log::test;

    use crate::ledger::Batch;

    use super::*;

    #[test]
    fn same_batch_gets_new_ids() {
        // Given
        let batch = Batch::new().id();

        // When
        let first = SubmissionId::next(&batch);
        let second = SubmissionId::next(&batch);

        // Then
        assert_ne!(first, second);
    }

    #[test]
    fn only_the_latest_finished_statuses_are_kept() {
        // Given
        let mut book = StatusBook::new(2);
        let batch = Batch::new().id();
        let ids = (0..4).map(|_| SubmissionId::next(&batch)).collect::<Vec<_>>();
        book.set(ids[3], Status::Pending);

        // When
        for id in &ids[..3] {
            book.set(*id, Status::Running);
            book.set(*id, Status::Succeeded);
        }

        // Then
        assert_eq!(book.get(&ids[0]), None);
        assert_eq!(book.get(&ids[1]), Some(Status::Succeeded));
        assert_eq!(book.get(&ids[2]), Some(Status::Succeeded));
        assert_eq!(book.get(&ids[3]), Some(Status::Pending));
        assert_eq!(book.len(), 3);
    }
}

// File: src/processor/processor.rs
// Project: Coffer
// Creation date: Friday 28 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Tuesday 11 March 2025 @ 14:22:09
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

use std::sync::Arc;

use async_channel::{Receiver, Sender};
use tokio::{
    sync::{oneshot, Mutex},
    task::JoinHandle,
};
use tracing::{debug, instrument, trace, warn};

use crate::ledger::{Batch, Ledger, Outcome};

use super::{
    queue::{batch_queue, Job, Report},
    status::{StatusBook, SubmissionId},
    Error, Result, Status,
};

/// Number of finished submissions whose status is remembered by default.
pub const DEFAULT_HISTORY: usize = 1_024;

type Statuses = Arc<Mutex<StatusBook>>;

#[instrument(skip(statuses))]
async fn update_status(statuses: &Statuses, id: SubmissionId, status: Status) {
    trace!("setting submission status");
    statuses.lock().await.set(id, status);
}

/// Applies submitted batches to a ledger, one at a time, in submission order.
pub struct Processor {
    ledger: Ledger,
    receiver: Receiver<Job>,
    statuses: Statuses,
}

/// Submits batches to a running [`Processor`].
///
/// The processor stops once every handle has been dropped and the queue
/// is empty.
#[derive(Clone)]
pub struct ProcessorHandle {
    sender: Sender<Job>,
    statuses: Statuses,
}

/// A batch handed to the processor, whose report hasn't been read yet.
#[must_use]
pub struct Submission {
    id: SubmissionId,
    report: oneshot::Receiver<Report>,
    statuses: Statuses,
}

/// The task running a [`Processor`].
pub struct ProcessorTask(JoinHandle<Ledger>);

impl Processor {
    /// Starts processing batches on the given ledger.
    ///
    /// The statuses of the last [`DEFAULT_HISTORY`] finished submissions
    /// are remembered.
    ///
    /// # Returns
    /// A handle to submit batches with, and the task running the processor.
    ///
    /// # Example
    /// ```rust
    /// # use coffer::{Error, amount::Usd, ledger::{Batch, Instruction, Ledger}, processor::Processor, vault::Owner};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Error> {
    /// let (handle, task) = Processor::spawn(Ledger::new());
    /// let mut batch = Batch::new();
    /// let vault = batch.add(Instruction::create_vault::<Usd>(Owner::from_bytes(&[1; 32])));
    /// batch.add(Instruction::mint_into(vault, 1_000));
    /// handle.submit(batch).await?;
    ///
    /// drop(handle);
    /// let ledger = task.join().await?;
    /// assert_eq!(ledger.len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn spawn(ledger: Ledger) -> (ProcessorHandle, ProcessorTask) {
        Self::with_history(ledger, DEFAULT_HISTORY)
    }

    /// Starts processing batches, remembering the statuses of the last
    /// `history` finished submissions.
    #[must_use]
    pub fn with_history(ledger: Ledger, history: usize) -> (ProcessorHandle, ProcessorTask) {
        let (sender, receiver) = batch_queue();
        let statuses = Arc::new(Mutex::new(StatusBook::new(history)));
        let processor = Self {
            ledger,
            receiver,
            statuses: Arc::clone(&statuses),
        };
        let task = tokio::spawn(processor.run());

        (ProcessorHandle { sender, statuses }, ProcessorTask(task))
    }

    #[instrument(skip_all)]
    async fn run(mut self) -> Ledger {
        debug!("processor started");
        while let Ok((id, batch, reply)) = self.receiver.recv().await {
            update_status(&self.statuses, id, Status::Running).await;
            let report = self.ledger.execute(&batch);
            let status = if report.is_ok() {
                Status::Succeeded
            } else {
                Status::Failed
            };
            update_status(&self.statuses, id, status).await;
            if reply.send(report).is_err() {
                trace!(%id, "submitter went away before the report");
            }
        }
        debug!("every handle dropped, stopping processor");

        self.ledger
    }
}

impl ProcessorHandle {
    /// Queues a batch without waiting for it to be processed.
    ///
    /// # Returns
    /// The submission, to get its identifier and wait for its report.
    ///
    /// # Errors
    /// If the processor stopped.
    #[instrument(skip_all, fields(batch = %batch.id()))]
    pub async fn send(&self, batch: Batch) -> Result<Submission> {
        let id = SubmissionId::next(&batch.id());
        debug!(%id, "queuing batch");
        let (reply, report) = oneshot::channel();
        update_status(&self.statuses, id, Status::Pending).await;
        if self.sender.send((id, batch, reply)).await.is_err() {
            warn!("the processor is not running");
            self.statuses.lock().await.forget(&id);
            return Err(Error::Stopped);
        }

        Ok(Submission {
            id,
            report,
            statuses: Arc::clone(&self.statuses),
        })
    }

    /// Submits a batch and waits until it's processed.
    ///
    /// # Returns
    /// The outcome of each of the batch's instructions.
    ///
    /// # Errors
    /// If the batch was rejected (in which case none of it was applied),
    /// or if the processor stopped.
    pub async fn submit(&self, batch: Batch) -> Result<Vec<Outcome>> {
        self.send(batch).await?.report().await
    }

    /// Get the status of a submission.
    ///
    /// Returns `None` for unknown submissions, and for finished ones that
    /// fell out of the processor's history.
    pub async fn status(&self, id: &SubmissionId) -> Option<Status> {
        self.statuses.lock().await.get(id)
    }
}

impl Submission {
    /// Get the identifier of the submission.
    #[must_use]
    pub const fn id(&self) -> &SubmissionId {
        &self.id
    }

    /// Waits for the batch to be processed.
    ///
    /// # Returns
    /// The outcome of each of the batch's instructions.
    ///
    /// # Errors
    /// If the batch was rejected (in which case none of it was applied),
    /// or if the processor stopped before processing it.
    #[instrument(skip(self), fields(id = %self.id))]
    pub async fn report(self) -> Result<Vec<Outcome>> {
        let Ok(report) = self.report.await else {
            warn!("the processor stopped before answering");
            self.statuses.lock().await.forget(&self.id);
            return Err(Error::Stopped);
        };

        Ok(report?)
    }
}

impl ProcessorTask {
    /// Waits for the processor to stop.
    ///
    /// # Returns
    /// The ledger, with every successful batch applied.
    ///
    /// # Errors
    /// If the processor's task crashed.
    pub async fn join(self) -> Result<Ledger> {
        Ok(self.0.await?)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {

    use test_log::test;

    use crate::{
        amount::{self, Usd},
        ledger::{self, Instruction},
        vault::{Owner, VaultId},
    };

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    fn two_vaults() -> Batch {
        let mut batch = Batch::new();
        let a = batch.add(Instruction::create_vault::<Usd>(Owner::from_bytes(&[1; 32])));
        batch.add(Instruction::create_vault::<Usd>(Owner::from_bytes(&[2; 32])));
        batch.add(Instruction::mint_into(a, 500));
        batch
    }

    fn created(outcomes: &[Outcome]) -> Vec<VaultId> {
        outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                Outcome::Created(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn transfer(from: VaultId, to: VaultId, quantity: u64) -> Batch {
        [Instruction::transfer(from, to, quantity)].into_iter().collect()
    }

    #[test(tokio::test)]
    async fn processed_batches_update_the_ledger() -> TestResult {
        // Given
        let (handle, task) = Processor::spawn(Ledger::new());
        let outcomes = handle.submit(two_vaults()).await?;
        let vaults = created(&outcomes);
        let (a, b) = (vaults[0], vaults[1]);

        // When
        let batch = [
            Instruction::transfer(a, b, 100),
            Instruction::transfer(a, b, 50),
        ]
        .into_iter()
        .collect::<Batch>();
        let submission = handle.send(batch).await?;
        let id = *submission.id();
        submission.report().await?;

        // Then
        assert_eq!(handle.status(&id).await, Some(Status::Succeeded));
        drop(handle);
        let ledger = task.join().await?;
        assert_eq!(ledger.balance_of(&a)?, 350);
        assert_eq!(ledger.balance_of(&b)?, 150);
        Ok(())
    }

    #[test(tokio::test)]
    async fn rejected_batches_are_reported() -> TestResult {
        // Given
        let (handle, task) = Processor::spawn(Ledger::new());
        let outcomes = handle.submit(two_vaults()).await?;
        let vaults = created(&outcomes);
        let batch = [
            Instruction::transfer(vaults[0], vaults[1], 400),
            Instruction::transfer(vaults[0], vaults[1], 400),
        ]
        .into_iter()
        .collect::<Batch>();

        // When
        let submission = handle.send(batch).await?;
        let id = *submission.id();
        let res = submission.report().await;

        // Then
        assert!(matches!(
            res,
            Err(Error::Ledger(ref err @ ledger::Error::Aborted { index: 1, .. }))
                if matches!(err.amount_error(), Some(amount::Error::InsufficientValue { .. }))
        ));
        assert_eq!(handle.status(&id).await, Some(Status::Failed));
        drop(handle);
        let ledger = task.join().await?;
        assert_eq!(ledger.balance_of(&vaults[0])?, 500);
        assert_eq!(ledger.balance_of(&vaults[1])?, 0);
        Ok(())
    }

    #[test(tokio::test)]
    async fn identical_submissions_keep_their_own_status() -> TestResult {
        // Given
        let (handle, _task) = Processor::spawn(Ledger::new());
        let vaults = created(&handle.submit(two_vaults()).await?);
        let (a, b) = (vaults[0], vaults[1]);

        // When
        let first = handle.send(transfer(a, b, 300)).await?;
        let second = handle.send(transfer(a, b, 300)).await?;
        let (first_id, second_id) = (*first.id(), *second.id());
        let first = first.report().await;
        let second = second.report().await;

        // Then
        assert_ne!(first_id, second_id);
        assert!(first.is_ok(), "the first transfer should go through");
        assert!(second.is_err(), "the second transfer should be rejected");
        assert_eq!(handle.status(&first_id).await, Some(Status::Succeeded));
        assert_eq!(handle.status(&second_id).await, Some(Status::Failed));
        Ok(())
    }

    #[test(tokio::test)]
    async fn concurrent_submissions_are_serialized() -> TestResult {
        // Given
        let (handle, task) = Processor::spawn(Ledger::new());
        let outcomes = handle.submit(two_vaults()).await?;
        let vaults = created(&outcomes);
        let (a, b) = (vaults[0], vaults[1]);

        // When
        let mut submissions = Vec::new();
        for _ in 0..10 {
            let handle = handle.clone();
            submissions.push(tokio::spawn(async move {
                handle.submit(transfer(a, b, 75)).await
            }));
        }
        let mut succeeded = 0_u64;
        for submission in submissions {
            if submission.await?.is_ok() {
                succeeded += 1;
            }
        }

        // Then
        drop(handle);
        let ledger = task.join().await?;
        assert_eq!(succeeded, 6);
        assert_eq!(ledger.balance_of(&a)?, 50);
        assert_eq!(ledger.balance_of(&b)?, 450);
        Ok(())
    }

    #[test(tokio::test)]
    async fn old_statuses_are_forgotten() -> TestResult {
        // Given
        let (handle, _task) = Processor::with_history(Ledger::new(), 1);

        // When
        let first = handle.send(two_vaults()).await?;
        let first_id = *first.id();
        first.report().await?;
        let second = handle.send(two_vaults()).await?;
        let second_id = *second.id();
        second.report().await?;

        // Then
        assert_eq!(handle.status(&first_id).await, None);
        assert_eq!(handle.status(&second_id).await, Some(Status::Succeeded));
        assert_eq!(handle.statuses.lock().await.len(), 1);
        Ok(())
    }

    #[test(tokio::test)]
    async fn submissions_to_a_stopped_processor_leave_no_status() -> TestResult {
        // Given
        let (handle, task) = Processor::spawn(Ledger::new());
        task.0.abort();
        let stopped = task.join().await;

        // When
        let res = handle.send(two_vaults()).await;

        // Then
        assert!(matches!(stopped, Err(Error::Crashed(_))));
        assert!(matches!(res, Err(Error::Stopped)));
        assert_eq!(handle.statuses.lock().await.len(), 0);
        Ok(())
    }

    #[test(tokio::test)]
    async fn unknown_submissions_have_no_status() -> TestResult {
        // Given
        let (handle, _task) = Processor::spawn(Ledger::new());

        // When
        let status = handle
            .status(&SubmissionId::from_bytes(&[3; 32]))
            .await;

        // Then
        assert_eq!(status, None);
        Ok(())
    }
}

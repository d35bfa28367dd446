// File: src/processor/queue.rs
// Project: Coffer
// Creation date: Tuesday 25 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 07 March 2025 @ 16:05:22
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

use async_channel::{unbounded, Receiver, Sender};
use tokio::sync::oneshot;

use crate::ledger::{self, Batch, Outcome};

use super::SubmissionId;

/// What the processor answers for each batch.
pub type Report = ledger::Result<Vec<Outcome>>;

/// A batch waiting to be processed, with the channel to answer on.
pub type Job = (SubmissionId, Batch, oneshot::Sender<Report>);

/// Both ends of the queue of submitted batches.
pub fn batch_queue() -> (Sender<Job>, Receiver<Job>) {
    unbounded()
}

// File: src/error.rs
// Project: Coffer
// Creation date: Wednesday 12 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 14 February 2025 @ 18:02:19
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

/// Errors of the Coffer library.
#[derive(Debug, Display, From)]
#[display("Coffer encountered an error {_variant}")]
pub enum Error {
    /// An error caused by the amounts module.
    #[from]
    Amount(crate::amount::Error),
    /// An error caused by the vaults module.
    #[from]
    Vault(crate::vault::Error),
    /// An error caused while decoding an identifier.
    #[from]
    Key(crate::key::Error),
    /// An error occurring while executing a batch.
    #[from]
    Ledger(crate::ledger::Error),
    /// An error occurring in the batch processor.
    #[from]
    Processor(crate::processor::Error),
    /// Error while configuring the tracing.
    #[display("while configuring the tracing: {_0}")]
    #[from]
    TracingConfiguration(tracing_subscriber::filter::FromEnvError),
}

impl core::error::Error for Error {}

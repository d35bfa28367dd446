// File: src/ledger/mod.rs
// Project: Coffer
// Creation date: Wednesday 19 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Tuesday 25 February 2025 @ 17:53:24
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

/// Ordered instructions applied as a unit.
mod batch;
/// Errors of the ledger module.
mod error;
/// Operations a batch is made of.
mod instruction;
/// The registry of vaults.
mod ledger;
/// Copy-on-write view of the ledger used while a batch runs.
mod staging;

pub use batch::{Batch, BatchId};
pub use error::Error;
pub use instruction::{Instruction, VaultRef};
pub use ledger::{Ledger, Outcome};

/// Result type of the ledger module.
pub type Result<T> = core::result::Result<T, Error>;

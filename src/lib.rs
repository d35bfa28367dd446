// File: src/lib.rs
// Project: Coffer
// Creation date: Friday 28 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Monday 03 March 2025 @ 14:43:58
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

//! The main library crate for Coffer, a ledger of currency-tagged amounts.
//!
//! Amounts carry their currency as a zero-sized type parameter, so that
//! dollars can never be joined with euros by mistake. Vaults own one amount
//! each, and the ledger applies batches of vault operations atomically.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(missing_docs)]

/// Errors that can happen anywhere in the ledger.
mod error;
/// Base58-displayed 32 bytes identifiers.
mod key;

/// Currency-tagged amounts and the supply they are issued from.
pub mod amount;
/// Registry of vaults and the atomic batches applied to it.
pub mod ledger;
/// Serialized processing of submitted batches.
pub mod processor;
/// Vaults owning a single amount of a fixed currency.
pub mod vault;

pub use error::Error;
pub use key::Error as KeyError;

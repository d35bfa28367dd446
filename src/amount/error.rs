// File: src/amount/error.rs
// Project: Coffer
// Creation date: Monday 10 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Monday 17 February 2025 @ 13:35:14
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

use std::fmt::{Debug, Display, Formatter};

use super::CurrencyCode;

/// Errors of the amounts module.
#[derive(Debug, derive_more::derive::Display)]
#[display("while handling an amount: {_variant}")]
pub enum Error {
    /// Tried to take more than an amount holds.
    #[display("insufficient value: {available} available but {requested} requested")]
    InsufficientValue {
        /// Value held by the amount.
        available: u64,
        /// Value that was asked for.
        requested: u64,
    },
    /// The resulting value would not fit in a `u64`.
    #[display("arithmetic overflow")]
    Overflow,
    /// Tried to mix amounts of different currencies.
    #[display("currency mismatch: expected {expected:?} but got {actual:?}")]
    DenominationMismatch {
        /// The currency of the receiving side.
        expected: CurrencyCode,
        /// The currency that was provided.
        actual: CurrencyCode,
    },
    /// Only empty amounts can be destroyed.
    #[display("cannot destroy an amount still holding {_0}")]
    NonZeroAmount(u64),
}

impl core::error::Error for Error {}

/// A value an operation refused to take, handed back to the caller.
///
/// Dropping it destroys the value it holds, so callers should put it back
/// where it came from.
#[must_use]
pub struct Rejected<T, E = Error> {
    /// Why the value was refused.
    pub error: E,
    /// The refused value, untouched.
    pub amount: T,
}

impl<T, E> Rejected<T, E> {
    pub(crate) const fn new(error: E, amount: T) -> Self {
        Self { error, amount }
    }
}

#[mutants::skip]
impl<T: Debug, E: Debug> Debug for Rejected<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .field("amount", &self.amount)
            .finish()
    }
}

#[mutants::skip]
impl<T, E: Display> Display for Rejected<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "value rejected: {}", self.error)
    }
}

impl<T: Debug, E: Debug + Display> core::error::Error for Rejected<T, E> {}

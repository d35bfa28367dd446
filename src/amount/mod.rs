// File: src/amount/mod.rs
// Project: Coffer
// Creation date: Sunday 16 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Sunday 23 February 2025 @ 17:53:35
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

/// Amounts tagged at the type level.
mod amount;
/// Currencies, at the type and value levels.
mod currency;
/// Errors of the amounts module.
mod error;
/// Supply an issuer mints amounts from.
mod supply;
/// Amounts tagged at the value level.
mod tagged;

pub use amount::{mint, Amount};
pub use currency::{Currency, CurrencyCode, Eur, Usd};
pub use error::{Error, Rejected};
pub use supply::Supply;
pub use tagged::TaggedAmount;

/// Result type of the amounts module.
pub type Result<T> = core::result::Result<T, Error>;

/// Result of operations handing the amount back when they fail.
pub type JoinResult<T> = core::result::Result<(), Rejected<T>>;

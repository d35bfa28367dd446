// File: src/amount/currency.rs
// Project: Coffer
// Creation date: Saturday 01 March 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Saturday 08 March 2025 @ 18:04:38
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
    any::type_name,
    fmt::{Debug, Display, Formatter},
};

use borsh::{BorshDeserialize, BorshSerialize};

/// A denomination amounts can be expressed in.
///
/// Currencies are zero-sized marker types: they only exist to tag amounts
/// and vaults at compile time. Use the [`currency!`](crate::currency) macro
/// to declare new ones.
pub trait Currency: 'static {
    /// Ticker of the currency (*e.g.* `USD`).
    const CODE: &'static str;

    /// The currency code, used when the currency is only known at runtime.
    #[must_use]
    fn code() -> CurrencyCode {
        CurrencyCode::of::<Self>()
    }
}

/// Declares a new currency marker type.
///
/// # Example
/// ```rust
/// # use coffer::{currency, amount::{mint, Currency}};
/// currency!(
///     /// Japanese yen.
///     Jpy, "JPY"
/// );
///
/// let yens = mint::<Jpy>(500);
/// assert_eq!(yens.value(), 500);
/// assert_eq!(Jpy::code().as_str(), "JPY");
/// ```
#[macro_export]
macro_rules! currency {
    ($(#[$meta:meta])* $name:ident, $code:literal) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub enum $name {}

        impl $crate::amount::Currency for $name {
            const CODE: &'static str = $code;
        }
    };
}

crate::currency!(
    /// United States dollar.
    Usd,
    "USD"
);

crate::currency!(
    /// Euro.
    Eur,
    "EUR"
);

/// Runtime representation of a [`Currency`].
///
/// Besides the ticker, the code records the marker type it was made from:
/// two currencies sharing a ticker are still told apart.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, BorshSerialize, BorshDeserialize)]
pub struct CurrencyCode {
    /// Ticker of the currency.
    ticker: String,
    /// Path of the marker type.
    marker: String,
}

impl CurrencyCode {
    /// The code of the currency `C`.
    ///
    /// # Example
    /// ```rust
    /// # use coffer::amount::{Currency, CurrencyCode, Usd};
    /// assert_eq!(CurrencyCode::of::<Usd>(), Usd::code());
    /// ```
    #[must_use]
    pub fn of<C: Currency + ?Sized>() -> Self {
        Self {
            ticker: C::CODE.to_owned(),
            marker: type_name::<C>().to_owned(),
        }
    }

    /// Checks whether the code designates the currency `C`.
    #[must_use]
    pub fn is<C: Currency + ?Sized>(&self) -> bool {
        self.ticker == C::CODE && self.marker == type_name::<C>()
    }

    /// Get the currency's ticker.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.ticker
    }

    /// Get the path of the currency's marker type.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }
}

#[mutants::skip]
impl Debug for CurrencyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.ticker, self.marker)
    }
}

#[mutants::skip]
impl Display for CurrencyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ticker)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {

    use test_log::test;

    use super::*;

    #[test]
    fn code_matches_its_currency_only() {
        // Given
        let code = Usd::code();

        // Then
        assert!(code.is::<Usd>());
        assert!(!code.is::<Eur>());
        assert_ne!(code, Eur::code());
    }

    #[test]
    fn currencies_sharing_a_ticker_stay_apart() {
        // Given
        crate::currency!(
            /// Another currency using the `USD` ticker.
            Dollar,
            "USD"
        );

        // When
        let dollar = Dollar::code();

        // Then
        assert_eq!(dollar.as_str(), Usd::code().as_str());
        assert_ne!(dollar, Usd::code());
        assert!(!Usd::code().is::<Dollar>());
        assert!(!dollar.is::<Usd>());
        assert!(dollar.is::<Dollar>());
    }
}

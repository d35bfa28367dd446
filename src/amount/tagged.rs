// File: src/amount/tagged.rs
// Project: Coffer
// Creation date: Friday 14 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Saturday 22 February 2025 @ 15:47:00
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

use tracing::{debug, instrument, warn};

use super::{Amount, Currency, CurrencyCode, Error, JoinResult, Rejected, Result};

/// A quantity whose currency is only known at runtime.
///
/// This is the form amounts take when they cross a boundary the type system
/// can't follow (*e.g.* vaults registered in a ledger and addressed by id).
/// Every operation mixing two tagged amounts checks their currencies before
/// touching anything.
#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub struct TaggedAmount {
    /// The currency of the amount.
    currency: CurrencyCode,
    /// The quantity held.
    value: u64,
}

impl TaggedAmount {
    /// Creates an empty amount of the given currency.
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self { currency, value: 0 }
    }

    /// Creates a new amount of the given currency out of thin air.
    #[instrument]
    pub fn mint(currency: CurrencyCode, value: u64) -> Self {
        debug!("minting new tagged amount");
        Self { currency, value }
    }

    /// Get the quantity held by the amount.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Get the currency of the amount.
    #[must_use]
    pub const fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Takes a part of the amount out.
    ///
    /// # Errors
    /// If the amount holds less than `quantity`, in which case it's left untouched.
    #[instrument(skip(self), fields(currency = %self.currency, value = self.value))]
    pub fn split(&mut self, quantity: u64) -> Result<Self> {
        debug!("splitting tagged amount");
        let Some(remaining) = self.value.checked_sub(quantity) else {
            warn!("not enough value to split");
            return Err(Error::InsufficientValue {
                available: self.value,
                requested: quantity,
            });
        };
        self.value = remaining;

        Ok(Self {
            currency: self.currency.clone(),
            value: quantity,
        })
    }

    /// Adds another amount into this one.
    ///
    /// # Errors
    /// If the currencies differ or if the sum doesn't fit in a `u64`.
    /// This amount is left untouched in both cases, and `other` is handed
    /// back in the [`Rejected`] error.
    ///
    /// # Example
    /// ```rust
    /// # use coffer::amount::{Currency, Error, Eur, TaggedAmount, Usd};
    /// let mut dollars = TaggedAmount::mint(Usd::code(), 100);
    /// let refused = dollars.join(TaggedAmount::mint(Eur::code(), 40)).unwrap_err();
    /// assert!(matches!(refused.error, Error::DenominationMismatch { .. }));
    /// assert_eq!(refused.amount.value(), 40);
    /// assert_eq!(dollars.value(), 100);
    /// ```
    #[instrument(skip_all, fields(currency = %self.currency, value = self.value, other = other.value))]
    pub fn join(&mut self, other: Self) -> JoinResult<Self> {
        debug!("joining tagged amounts");
        if let Err(error) = self.check_currency(&other.currency) {
            return Err(Rejected::new(error, other));
        }
        let Some(sum) = self.value.checked_add(other.value) else {
            warn!("joining the amounts would overflow");
            return Err(Rejected::new(Error::Overflow, other));
        };
        self.value = sum;

        Ok(())
    }

    /// Checks that `currency` is the one of this amount.
    ///
    /// # Errors
    /// If the currencies differ.
    pub fn check_currency(&self, currency: &CurrencyCode) -> Result<()> {
        if self.currency != *currency {
            warn!(expected = %self.currency, actual = %currency, "currency mismatch");
            return Err(Error::DenominationMismatch {
                expected: self.currency.clone(),
                actual: currency.clone(),
            });
        }

        Ok(())
    }

    /// Converts back into an amount tagged at the type level.
    ///
    /// # Errors
    /// The tagged amount is handed back if its currency isn't `C`.
    ///
    /// # Example
    /// ```rust
    /// # use coffer::amount::{mint, Eur, TaggedAmount, Usd};
    /// let tagged = TaggedAmount::from(mint::<Usd>(10));
    /// let tagged = tagged.into_typed::<Eur>().unwrap_err();
    /// let dollars = tagged.into_typed::<Usd>().unwrap();
    /// assert_eq!(dollars.value(), 10);
    /// ```
    pub fn into_typed<C: Currency>(self) -> core::result::Result<Amount<C>, Self> {
        if !self.currency.is::<C>() {
            return Err(self);
        }

        Ok(Amount::with_value(self.value))
    }

    /// Copies the amount, so that a batch can work on it and be discarded.
    pub(crate) fn checkpoint(&self) -> Self {
        Self {
            currency: self.currency.clone(),
            value: self.value,
        }
    }
}

impl<C: Currency> From<Amount<C>> for TaggedAmount {
    fn from(value: Amount<C>) -> Self {
        Self {
            currency: C::code(),
            value: value.value(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {

    use test_log::test;

    use super::super::{mint, Eur, Usd};
    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    #[test]
    fn split_keeps_the_currency() -> TestResult {
        // Given
        let mut amount = TaggedAmount::mint(Eur::code(), 90);

        // When
        let part = amount.split(30)?;

        // Then
        assert_eq!(part.currency(), &Eur::code());
        assert_eq!(part.value(), 30);
        assert_eq!(amount.value(), 60);
        Ok(())
    }

    #[test]
    fn mixing_currencies_is_rejected_without_mutation() -> TestResult {
        // Given
        let mut euros = TaggedAmount::mint(Eur::code(), 500);
        let dollars = TaggedAmount::from(mint::<Usd>(100));

        // When
        let res = euros.join(dollars);

        // Then
        let Err(Rejected { error, amount }) = res else {
            return Err("dollars joined into euros".into());
        };
        assert!(matches!(
            error,
            Error::DenominationMismatch { expected, actual }
                if expected.is::<Eur>() && actual.is::<Usd>()
        ));
        assert_eq!(amount, TaggedAmount::mint(Usd::code(), 100));
        assert_eq!(euros.value(), 500);
        Ok(())
    }

    #[test]
    fn join_refuses_to_overflow() {
        // Given
        let mut amount = TaggedAmount::mint(Usd::code(), u64::MAX);

        // When
        let res = amount.join(TaggedAmount::mint(Usd::code(), 1));

        // Then
        assert!(matches!(
            res,
            Err(Rejected {
                error: Error::Overflow,
                amount: ref refused,
            }) if refused.value() == 1
        ));
        assert_eq!(amount.value(), u64::MAX);
    }

    #[test]
    fn typed_conversion_tells_lookalike_currencies_apart() -> TestResult {
        // Given
        crate::currency!(
            /// A currency reusing the dollar's ticker.
            Dollar,
            "USD"
        );
        let tagged = TaggedAmount::from(mint::<Usd>(100));

        // When
        let res = tagged.into_typed::<Dollar>();

        // Then
        let Err(tagged) = res else {
            return Err("dollars converted into a lookalike currency".into());
        };
        assert_eq!(tagged.value(), 100);
        assert!(tagged.currency().is::<Usd>());
        Ok(())
    }

    #[test]
    fn typed_conversion_checks_the_currency() -> TestResult {
        // Given
        let tagged = TaggedAmount::mint(Usd::code(), 75);

        // When
        let rejected = tagged.into_typed::<Eur>();
        let Err(tagged) = rejected else {
            return Err("dollars converted into euros".into());
        };
        let dollars = tagged.into_typed::<Usd>();

        // Then
        assert!(matches!(dollars, Ok(amount) if amount.value() == 75));
        Ok(())
    }
}

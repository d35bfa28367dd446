// File: src/amount/supply.rs
// Project: Coffer
// Creation date: Tuesday 25 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Monday 03 March 2025 @ 11:14:40
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

use std::marker::PhantomData;

use tracing::{debug, instrument, warn};

use super::{Amount, Currency, Error, Rejected, Result};

/// Tracks the total value of a currency issued by its owner.
///
/// Every amount created through [`Supply::increase`] is accounted for, and
/// burning it back with [`Supply::decrease`] lowers the total accordingly.
#[derive(Debug)]
pub struct Supply<C: Currency> {
    /// Total value currently issued.
    total: u64,
    /// The issued currency.
    currency: PhantomData<C>,
}

impl<C: Currency> Supply<C> {
    /// Creates a supply with nothing issued yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total: 0,
            currency: PhantomData,
        }
    }

    /// Get the total value issued.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.total
    }

    /// Issues new value.
    ///
    /// # Parameters
    /// * `quantity` - The quantity to issue.
    ///
    /// # Returns
    /// An amount holding the freshly issued value.
    ///
    /// # Errors
    /// If the total supply would overflow.
    ///
    /// # Example
    /// ```rust
    /// # use coffer::amount::{Error, Supply, Usd};
    /// let mut supply = Supply::<Usd>::new();
    /// let dollars = supply.increase(1_000)?;
    /// assert_eq!(dollars.value(), supply.value());
    /// # Ok::<(), Error>(())
    /// ```
    #[instrument(skip(self), fields(currency = C::CODE, total = self.total))]
    pub fn increase(&mut self, quantity: u64) -> Result<Amount<C>> {
        debug!("increasing supply");
        self.total = self.total.checked_add(quantity).ok_or_else(|| {
            warn!("the supply would overflow");
            Error::Overflow
        })?;

        Ok(Amount::with_value(quantity))
    }

    /// Burns an amount, removing its value from the supply.
    ///
    /// # Parameters
    /// * `amount` - The amount to burn.
    ///
    /// # Returns
    /// The remaining total supply.
    ///
    /// # Errors
    /// If the amount holds more than was ever issued from this supply, in
    /// which case it's handed back.
    #[instrument(skip_all, fields(currency = C::CODE, total = self.total, burnt = amount.value()))]
    pub fn decrease(
        &mut self,
        amount: Amount<C>,
    ) -> core::result::Result<u64, Rejected<Amount<C>>> {
        debug!("decreasing supply");
        let Some(total) = self.total.checked_sub(amount.value()) else {
            warn!("burning more than was issued");
            let error = Error::InsufficientValue {
                available: self.total,
                requested: amount.value(),
            };
            return Err(Rejected::new(error, amount));
        };
        self.total = total;

        Ok(total)
    }
}

impl<C: Currency> Default for Supply<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {

    use test_log::test;

    use super::super::{mint, Usd};
    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    #[test]
    fn issued_value_is_tracked() -> TestResult {
        // Given
        let mut supply = Supply::<Usd>::new();

        // When
        let mut first = supply.increase(700)?;
        let second = supply.increase(300)?;
        first.join(second)?;
        let remaining = supply.decrease(first.split(200)?)?;

        // Then
        assert_eq!(remaining, 800);
        assert_eq!(first.value(), supply.value());
        Ok(())
    }

    #[test]
    fn supply_cannot_overflow() -> TestResult {
        // Given
        let mut supply = Supply::<Usd>::new();
        let _issued = supply.increase(u64::MAX)?;

        // When
        let res = supply.increase(1);

        // Then
        assert!(matches!(res, Err(Error::Overflow)));
        assert_eq!(supply.value(), u64::MAX);
        Ok(())
    }

    #[test]
    fn cannot_burn_more_than_issued() -> TestResult {
        // Given
        let mut supply = Supply::<Usd>::new();
        let _issued = supply.increase(10)?;

        // When
        let res = supply.decrease(mint(11));

        // Then
        assert!(matches!(
            res,
            Err(Rejected {
                error: Error::InsufficientValue { .. },
                ref amount,
            }) if amount.value() == 11
        ));
        assert_eq!(supply.value(), 10);
        Ok(())
    }
}

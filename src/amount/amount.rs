// File: src/amount/amount.rs
// Project: Coffer
// Creation date: Monday 17 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Wednesday 26 February 2025 @ 17:08:23
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
    fmt::{Debug, Formatter},
    marker::PhantomData,
    mem,
};

use tracing::{debug, instrument, trace, warn};

use super::{Currency, Error, JoinResult, Rejected, Result};

/// A quantity of the currency `C`.
///
/// Amounts can't be copied: the only ways to create value are [`mint`] and
/// [`Supply::increase`](super::Supply::increase), and the only way to move it
/// is to [`split`](Amount::split) it from one amount and [`join`](Amount::join)
/// it into another. Amounts of different currencies can't be mixed:
///
/// ```compile_fail
/// # use coffer::amount::{mint, Eur, Usd};
/// let mut dollars = mint::<Usd>(10);
/// dollars.join(mint::<Eur>(5)).map_err(|rejected| rejected.error)?;
/// # Ok::<(), coffer::amount::Error>(())
/// ```
#[must_use]
pub struct Amount<C: Currency> {
    /// The quantity held.
    value: u64,
    /// The currency of the amount.
    currency: PhantomData<C>,
}

/// Creates a new amount out of thin air.
///
/// # Parameters
/// * `value` - The quantity to create.
///
/// # Example
/// ```rust
/// # use coffer::amount::{mint, Usd};
/// let dollars = mint::<Usd>(1_000);
/// assert_eq!(dollars.value(), 1_000);
/// ```
#[instrument(fields(currency = C::CODE))]
pub fn mint<C: Currency>(value: u64) -> Amount<C> {
    debug!("minting new amount");
    Amount::with_value(value)
}

impl<C: Currency> Amount<C> {
    pub(crate) const fn with_value(value: u64) -> Self {
        Self {
            value,
            currency: PhantomData,
        }
    }

    /// Creates an empty amount.
    pub const fn zero() -> Self {
        Self::with_value(0)
    }

    /// Get the quantity held by the amount.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Takes a part of the amount out.
    ///
    /// # Parameters
    /// * `quantity` - The quantity to take out.
    ///
    /// # Returns
    /// A new amount holding `quantity`.
    ///
    /// # Errors
    /// If the amount holds less than `quantity`, in which case it's left untouched.
    ///
    /// # Example
    /// ```rust
    /// # use coffer::amount::{mint, Error, Usd};
    /// let mut dollars = mint::<Usd>(1_000);
    /// let part = dollars.split(250)?;
    /// assert_eq!(dollars.value(), 750);
    /// assert_eq!(part.value(), 250);
    /// # Ok::<(), Error>(())
    /// ```
    #[instrument(skip(self), fields(currency = C::CODE, value = self.value))]
    pub fn split(&mut self, quantity: u64) -> Result<Self> {
        debug!("splitting amount");
        let Some(remaining) = self.value.checked_sub(quantity) else {
            warn!("not enough value to split");
            return Err(Error::InsufficientValue {
                available: self.value,
                requested: quantity,
            });
        };
        self.value = remaining;

        Ok(Self::with_value(quantity))
    }

    /// Adds another amount of the same currency into this one.
    ///
    /// # Parameters
    /// * `other` - The amount to absorb.
    ///
    /// # Errors
    /// If the sum doesn't fit in a `u64`. This amount is left untouched, and
    /// `other` is handed back in the [`Rejected`] error.
    ///
    /// # Example
    /// ```rust
    /// # use coffer::amount::{mint, Error, Usd};
    /// let mut dollars = mint::<Usd>(u64::MAX - 100);
    /// dollars.join(mint(100)).map_err(|rejected| rejected.error)?;
    ///
    /// let refused = dollars.join(mint(1)).unwrap_err();
    /// assert!(matches!(refused.error, Error::Overflow));
    /// assert_eq!(refused.amount.value(), 1);
    /// # Ok::<(), Error>(())
    /// ```
    #[instrument(skip_all, fields(currency = C::CODE, value = self.value, other = other.value))]
    pub fn join(&mut self, other: Self) -> JoinResult<Self> {
        debug!("joining amounts");
        let Some(sum) = self.value.checked_add(other.value) else {
            warn!("joining the amounts would overflow");
            return Err(Rejected::new(Error::Overflow, other));
        };
        self.value = sum;

        Ok(())
    }

    /// Takes everything out of the amount, leaving it empty.
    #[instrument(skip(self), fields(currency = C::CODE, value = self.value))]
    pub fn withdraw_all(&mut self) -> Self {
        trace!("withdrawing the whole amount");
        Self::with_value(mem::take(&mut self.value))
    }

    /// Destroys an empty amount.
    ///
    /// # Errors
    /// If the amount still holds some value.
    pub fn destroy_zero(self) -> Result<()> {
        if self.value != 0 {
            warn!(value = self.value, "refusing to destroy a non-empty amount");
            return Err(Error::NonZeroAmount(self.value));
        }

        Ok(())
    }
}

impl<C: Currency> Default for Amount<C> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<C: Currency> PartialEq for Amount<C> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<C: Currency> Eq for Amount<C> {}

#[mutants::skip]
impl<C: Currency> Debug for Amount<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, C::CODE)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {

    use test_log::test;

    use super::super::{Eur, Supply, Usd};
    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    #[test]
    fn split_moves_value_out() -> TestResult {
        // Given
        let mut amount = mint::<Usd>(1_000);

        // When
        let part = amount.split(400)?;

        // Then
        assert_eq!(amount.value(), 600);
        assert_eq!(part.value(), 400);
        Ok(())
    }

    #[test]
    fn split_more_than_available_leaves_amount_untouched() {
        // Given
        let mut amount = mint::<Usd>(100);

        // When
        let res = amount.split(101);

        // Then
        assert!(matches!(
            res,
            Err(Error::InsufficientValue {
                available: 100,
                requested: 101
            })
        ));
        assert_eq!(amount.value(), 100);
    }

    #[test]
    fn split_then_join_conserves_value() -> TestResult {
        // Given
        let mut first = mint::<Eur>(1_000);
        let mut second = Amount::<Eur>::zero();

        // When
        for quantity in [1, 10, 100, 250] {
            second.join(first.split(quantity)?)?;
        }

        // Then
        assert_eq!(first.value() + second.value(), 1_000);
        assert_eq!(second.value(), 361);
        Ok(())
    }

    #[test]
    fn join_refuses_to_overflow() {
        // Given
        let mut amount = mint::<Usd>(u64::MAX - 10);

        // When
        let res = amount.join(mint(11));

        // Then
        assert!(matches!(
            res,
            Err(Rejected {
                error: Error::Overflow,
                amount: ref refused,
            }) if refused.value() == 11
        ));
        assert_eq!(amount.value(), u64::MAX - 10);
    }

    #[test]
    fn refused_value_can_be_put_back() -> TestResult {
        // Given
        let mut supply = Supply::<Usd>::new();
        let mut issued = supply.increase(10)?;
        let mut big = mint::<Usd>(u64::MAX);

        // When
        let Err(refused) = big.join(issued.split(4)?) else {
            return Err("joined past u64::MAX".into());
        };
        issued.join(refused.amount)?;

        // Then
        assert_eq!(big.value(), u64::MAX);
        assert_eq!(issued.value(), supply.value());
        Ok(())
    }

    #[test]
    fn withdraw_all_empties_the_amount() -> TestResult {
        // Given
        let mut amount = mint::<Usd>(42);

        // When
        let all = amount.withdraw_all();

        // Then
        assert_eq!(all.value(), 42);
        amount.destroy_zero()?;
        Ok(())
    }

    #[test]
    fn only_empty_amounts_can_be_destroyed() {
        // Given
        let amount = mint::<Usd>(1);

        // When
        let res = amount.destroy_zero();

        // Then
        assert!(matches!(res, Err(Error::NonZeroAmount(1))));
    }
}

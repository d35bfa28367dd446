// File: src/key.rs
// Project: Coffer
// Creation date: Monday 10 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 14 February 2025 @ 16:38:46
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

/// Length in bytes of every identifier.
pub const KEY_LENGTH: usize = 32;

/// Errors raised when decoding an identifier.
#[derive(Debug, Display, From)]
#[display("while decoding an identifier: {_variant}")]
pub enum Error {
    /// Could not decode a string as `base58`
    #[display("invalid base58 string: {_0}")]
    #[from]
    Bs58Decoding(bs58::decode::Error),
    /// The decoded bytes don't have the length of an identifier.
    #[display("expected 32 bytes, but got {_0}")]
    WrongLength(usize),
}

impl core::error::Error for Error {}

/// Declares a 32 bytes identifier displayed and parsed as `base58`.
macro_rules! base58_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::borsh::BorshSerialize,
            ::borsh::BorshDeserialize,
        )]
        pub struct $name {
            bytes: [u8; $crate::key::KEY_LENGTH],
        }

        impl $name {
            /// Creates the identifier from its byte representation.
            #[must_use]
            pub const fn from_bytes(bytes: &[u8; $crate::key::KEY_LENGTH]) -> Self {
                Self { bytes: *bytes }
            }

            /// Get the byte representation of the identifier.
            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; $crate::key::KEY_LENGTH] {
                &self.bytes
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::key::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                let decoded = ::bs58::decode(s).into_vec()?;
                let bytes: [u8; $crate::key::KEY_LENGTH] = decoded
                    .as_slice()
                    .try_into()
                    .map_err(|_err| $crate::key::Error::WrongLength(decoded.len()))?;
                Ok(Self { bytes })
            }
        }

        #[mutants::skip]
        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                let encoded = ::bs58::encode(&self.bytes).into_string();
                write!(f, "{encoded}")
            }
        }

        #[mutants::skip]
        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                let encoded = ::bs58::encode(&self.bytes).into_string();
                write!(f, "{encoded}")
            }
        }

        #[mutants::skip]
        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.bytes
            }
        }
    };
}

pub(crate) use base58_key;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {

    use test_log::test;

    use super::*;
    type TestResult = core::result::Result<(), Box<dyn core::error::Error>>;

    base58_key!(
        /// Identifier used by the tests.
        TestKey
    );

    #[test]
    fn display_then_parse_gives_same_key() -> TestResult {
        // Given
        let key = TestKey::from_bytes(&[7; KEY_LENGTH]);

        // When
        let parsed: TestKey = key.to_string().parse()?;

        // Then
        assert_eq!(parsed, key);
        Ok(())
    }

    #[test]
    fn reject_keys_of_wrong_length() {
        // Given
        let short = bs58::encode(&[1_u8; 12]).into_string();

        // When
        let res = short.parse::<TestKey>();

        // Then
        assert!(matches!(res, Err(Error::WrongLength(12))));
    }

    #[test]
    fn reject_non_base58_strings() {
        // When
        let res = "not-base58-0OIl".parse::<TestKey>();

        // Then
        assert!(matches!(res, Err(Error::Bs58Decoding(_))));
    }
}

//! Newtype IDs for type-safe entity references.
//!
//! Store and order identifiers are assigned outside this system (the store
//! owner picks the store ID at registration, the shop platform assigns order
//! IDs), so they wrap strings rather than integers. Use the `define_id!` macro
//! to create wrappers that prevent accidentally mixing IDs of different
//! entity types.

/// Errors that can occur when parsing an identifier.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input is empty or only whitespace.
    #[error("{kind} cannot be empty")]
    Empty {
        /// Name of the identifier type.
        kind: &'static str,
    },
}

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` as a plain string, validated by `parse()` on load
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `parse()` rejecting blank input, `as_str()`, `Display`, `FromStr`
///
/// # Example
///
/// ```rust
/// # use leaderboard_core::define_id;
/// define_id!(ShopId);
/// define_id!(CartId);
///
/// let shop = ShopId::parse("10000001").unwrap();
/// let cart = CartId::parse("10000001").unwrap();
///
/// // These are different types, so this won't compile:
/// // let _: ShopId = cart;
/// assert_eq!(shop.as_str(), cart.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse an ID, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns [`IdError::Empty`] if the input is blank.
            pub fn parse(s: &str) -> Result<Self, $crate::types::id::IdError> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err($crate::types::id::IdError::Empty {
                        kind: stringify!($name),
                    });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Get the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl ::core::convert::TryFrom<String> for $name {
            type Error = $crate::types::id::IdError;

            fn try_from(s: String) -> ::core::result::Result<Self, Self::Error> {
                Self::parse(&s)
            }
        }

        impl ::core::convert::From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(StoreId);
define_id!(OrderId);

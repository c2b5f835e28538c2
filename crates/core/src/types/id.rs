//! Newtype IDs for type-safe entity references.
//!
//! The GraphQL API hands out opaque global IDs (base64 of `Type:pk`). Use the
//! `define_id!` macro to create wrappers that keep a zone ID from being passed
//! where a warehouse ID is expected.

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `Display`, `AsRef<str>` and `From<String>`/`From<&str>`
///
/// # Example
///
/// ```rust
/// # use harbor_core::define_id;
/// define_id!(ZoneId);
/// define_id!(DepotId);
///
/// let zone_id = ZoneId::new("U2hpcHBpbmdab25lOjE=");
/// let depot_id = DepotId::new("U2hpcHBpbmdab25lOjE=");
///
/// // These are different types, so this won't compile:
/// // let _: ZoneId = depot_id;
/// assert_eq!(zone_id.as_str(), depot_id.as_str());
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
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from its opaque string form.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying opaque string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ShippingZoneId);
define_id!(ShippingMethodId);
define_id!(WarehouseId);

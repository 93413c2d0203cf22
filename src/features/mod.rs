//! Trait implementations gated behind feature flags.

#[cfg(feature = "serde")]
mod serde;

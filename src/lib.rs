//! This library decides which of a holder's credentials satisfy a verifier's
//! [Presentation Definition].
//!
//! [Presentation Definition]: <https://identity.foundation/presentation-exchange/spec/v2.0.0/#presentation-definition>
//!
//! # Usage
//!
//! ```ignore
//! use presentation_matcher::core::credential::WalletCredential;
//! use presentation_matcher::core::presentation_definition::PresentationDefinition;
//! use presentation_matcher::matcher::{FilterMatchStrategy, PresentationDefinitionMatchStrategy};
//!
//! let definition = PresentationDefinition::try_from(request["presentation_definition"].clone())?;
//!
//! let credentials: Vec<WalletCredential> = wallet
//!     .credentials()
//!     .map(|(id, document)| WalletCredential::new(id, document))
//!     .collect();
//!
//! // Credentials are returned in the order they were given.
//! let candidates = FilterMatchStrategy.match_credentials(&credentials, &definition)?;
//! ```
//!
//! Any type exposing a parsed claim document can be matched by implementing
//! [`Credential`]; `serde_json::Value` implements it directly.
//!
//! [`Credential`]: crate::core::credential::Credential
//!
//! # Matching
//!
//! Matching only decides candidacy. No signature or status is verified.
//!
//! 1. *Filter extraction*: each input descriptor is reduced to a group of
//!    type filters, one per constraint field whose path mentions `type`, plus
//!    one per schema reference. See [`matcher::type_filter`].
//! 2. *Evaluation*: a credential matches when all filters of at least one
//!    group match. A filter compares the claim at its path with its pattern;
//!    for an array claim, the last entry is compared.
//!
//! The [`PresentationDefinitionMatchStrategy`] trait allows replacing this
//! with another evaluation, such as [`PresentationExchangeMatchStrategy`],
//! which evaluates JSONPath expressions and JSON Schema filters. The
//! [`MatchStrategy`] enum, built from a [`MatcherConfig`], selects one at
//! runtime.
//!
//! [`PresentationDefinitionMatchStrategy`]: crate::matcher::PresentationDefinitionMatchStrategy
//! [`PresentationExchangeMatchStrategy`]: crate::matcher::PresentationExchangeMatchStrategy
//! [`MatchStrategy`]: crate::matcher::MatchStrategy
//! [`MatcherConfig`]: crate::config::MatcherConfig
//!
//! # Verification Material
//!
//! [`verification_material::select`] picks the verification method of a DID
//! document by a fixed relationship priority.

pub mod config;
pub mod core;
pub mod matcher;
pub mod utils;
pub mod verification_material;

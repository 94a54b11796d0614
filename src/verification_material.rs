//! Selection of the verification material of a DID document.
//!
//! A DID document may list its keys under several verification relationships.
//! The first relationship present in [`VERIFICATION_RELATIONSHIPS`] is used,
//! regardless of the order of keys in the document itself.

use serde_json::{Map, Value as Json};

/// Verification relationships, by decreasing priority.
pub const VERIFICATION_RELATIONSHIPS: [&str; 6] = [
    "verificationMethod",
    "assertionMethod",
    "capabilityInvocation",
    "capabilityDelegation",
    "keyAgreement",
    "authentication",
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VerificationMaterialError {
    /// The selected relationship is neither an object nor an array.
    #[error("illegal verification method type in `{0}`")]
    UnsupportedMethodShape(&'static str),

    /// The selected relationship is an empty array.
    #[error("no verification method listed in `{0}`")]
    EmptyMethodList(&'static str),

    /// The first entry of the selected relationship is itself an array.
    #[error("illegal verification material type in `{0}`")]
    UnsupportedMaterialShape(&'static str),
}

/// Return the verification material of a DID document.
///
/// The first present relationship is taken; when it is an array its first
/// entry is used. The material is either an embedded verification method
/// (an object) or a reference to one (a primitive, usually a DID URL).
///
/// Returns `Ok(None)` when the document has none of the relationships.
pub fn select(document: &Map<String, Json>) -> Result<Option<Json>, VerificationMaterialError> {
    let Some((relationship, section)) = VERIFICATION_RELATIONSHIPS
        .iter()
        .find_map(|&relationship| {
            document
                .get(relationship)
                .map(|section| (relationship, section))
        })
    else {
        return Ok(None);
    };

    let method = match section {
        Json::Array(methods) => methods
            .first()
            .ok_or(VerificationMaterialError::EmptyMethodList(relationship))?,
        Json::Object(_) => section,
        _ => return Err(VerificationMaterialError::UnsupportedMethodShape(relationship)),
    };

    match method {
        Json::Array(_) => Err(VerificationMaterialError::UnsupportedMaterialShape(
            relationship,
        )),
        material => Ok(Some(material.clone())),
    }
}

use presentation_matcher::verification_material::{self, VerificationMaterialError};
use serde_json::{json, Map, Value as Json};

fn did_document(value: Json) -> Map<String, Json> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn priority_ignores_document_key_order() {
    let document = did_document(json!({
        "@context": ["https://www.w3.org/ns/did/v1"],
        "id": "did:example:123",
        "authentication": ["did:example:123#key-1"],
        "keyAgreement": ["did:example:123#key-2"],
        "capabilityDelegation": ["did:example:123#key-3"]
    }));
    assert_eq!(
        document.keys().next().map(String::as_str),
        Some("@context"),
        "document keys keep insertion order"
    );

    assert_eq!(
        verification_material::select(&document).unwrap(),
        Some(json!("did:example:123#key-3"))
    );
}

#[test]
fn authentication_only_without_other_relationships() {
    let document = did_document(json!({
        "id": "did:example:123",
        "authentication": [{
            "id": "did:example:123#key-1",
            "type": "JsonWebKey2020",
            "controller": "did:example:123",
            "publicKeyJwk": { "kty": "OKP", "crv": "Ed25519", "x": "VCpo2LMLhn6iWku8MKvSLg2ZAoC-nlOyPVQaO3FxVeQ" }
        }]
    }));

    let material = verification_material::select(&document).unwrap().unwrap();
    assert_eq!(material["id"], json!("did:example:123#key-1"));
}

#[test]
fn wrong_shape_is_not_absent() {
    let document = did_document(json!({
        "verificationMethod": [[{ "id": "did:example:123#key-1" }]]
    }));
    assert_eq!(
        verification_material::select(&document),
        Err(VerificationMaterialError::UnsupportedMaterialShape(
            "verificationMethod"
        ))
    );

    let document = did_document(json!({ "service": [] }));
    assert_eq!(verification_material::select(&document), Ok(None));
}

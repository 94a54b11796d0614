use super::path;

use serde_json::Value as Json;

/// A holder-side credential whose claims can be matched against a presentation definition.
///
/// Storage and format decoding belong to the wallet; matching only needs the
/// parsed claim document. A credential without a usable document returns
/// `None` and never matches anything.
pub trait Credential {
    /// Return the parsed claim document, if the credential has one.
    fn parsed_document(&self) -> Option<&Json>;

    /// Resolve a claim by path. See [`path::resolve`] for the accepted notation.
    fn claim(&self, claim_path: &str) -> Option<&Json> {
        self.parsed_document()
            .and_then(|document| path::resolve(document, claim_path))
    }

    /// Return the most specific credential type, i.e. the last entry of the
    /// `type` claim, or the claim itself when it is a plain string.
    fn credential_type(&self) -> Option<&str> {
        match self.claim("type")? {
            Json::Array(types) => types.last()?.as_str(),
            Json::String(credential_type) => Some(credential_type.as_str()),
            _ => None,
        }
    }

    /// Return the `credentialSubject.id` claim.
    fn subject_id(&self) -> Option<&str> {
        self.claim("credentialSubject.id")?.as_str()
    }
}

impl Credential for Json {
    fn parsed_document(&self) -> Option<&Json> {
        Some(self)
    }
}

impl Credential for Option<Json> {
    fn parsed_document(&self) -> Option<&Json> {
        self.as_ref()
    }
}

impl<C: Credential + ?Sized> Credential for &C {
    fn parsed_document(&self) -> Option<&Json> {
        (**self).parsed_document()
    }
}

/// A credential record as stored by a wallet: its identifier, the raw
/// document and the document parsed from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletCredential {
    id: String,
    document: String,
    parsed_document: Option<Json>,
}

impl WalletCredential {
    /// Create a new record, parsing `document` as JSON.
    ///
    /// A document that does not parse is kept as is; the record then has no
    /// parsed document.
    pub fn new(id: String, document: String) -> Self {
        let parsed_document = match serde_json::from_str(&document) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::debug!("credential {id} has an unparseable document: {e}");
                None
            }
        };

        Self {
            id,
            document,
            parsed_document,
        }
    }

    /// Create a new record from an already parsed document.
    pub fn from_parsed(id: String, parsed_document: Json) -> Self {
        Self {
            id,
            document: parsed_document.to_string(),
            parsed_document: Some(parsed_document),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Return the raw document.
    pub fn document(&self) -> &str {
        &self.document
    }
}

impl Credential for WalletCredential {
    fn parsed_document(&self) -> Option<&Json> {
        self.parsed_document.as_ref()
    }
}

//! Resolution of claim paths against a parsed credential document.
//!
//! Two notations are accepted:
//!
//! - JSON pointers (`/credentialSubject/degree/type`), handed to
//!   [`serde_json::Value::pointer`];
//! - dotted paths (`credentialSubject.degree.type`), optionally rooted with
//!   `$` or `$.`, where a segment may carry array indices (`evidence[0]`) and
//!   a purely numeric segment indexes into an array (`evidence.0`).
//!
//! Wildcards and recursive descent are not supported. Resolution never fails:
//! anything that cannot be walked resolves to `None`.

use serde_json::Value as Json;

/// Resolve `path` against `document`, returning the raw node found there.
pub fn resolve<'a>(document: &'a Json, path: &str) -> Option<&'a Json> {
    if path.starts_with('/') {
        return document.pointer(path);
    }

    let path = strip_root(path);
    if path.is_empty() {
        return Some(document);
    }

    path.split('.').try_fold(document, step)
}

/// Strip a leading `$.` (or a lone `$`) root marker.
pub fn strip_root(path: &str) -> &str {
    match path.strip_prefix("$.") {
        Some(rest) => rest,
        None if path == "$" => "",
        None => path,
    }
}

fn step<'a>(node: &'a Json, segment: &str) -> Option<&'a Json> {
    let (key, indices) = match segment.find('[') {
        Some(at) => segment.split_at(at),
        None => (segment, ""),
    };

    let mut node = if key.is_empty() {
        if indices.is_empty() {
            return None;
        }
        node
    } else {
        match node {
            Json::Object(map) => map.get(key)?,
            Json::Array(items) => items.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        }
    };

    let mut rest = indices;
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        let index = inner[..close].trim().parse::<usize>().ok()?;
        node = node.as_array()?.get(index)?;
        rest = &inner[close + 1..];
    }

    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn document() -> Json {
        json!({
            "type": ["VerifiableCredential", "UniversityDegreeCredential"],
            "credentialSubject": {
                "id": "did:example:holder",
                "degree": { "type": "BachelorDegree" }
            },
            "evidence": [{ "id": "e-1" }, { "id": "e-2" }]
        })
    }

    #[test]
    fn top_level_key() {
        let doc = document();
        assert_eq!(
            resolve(&doc, "type"),
            Some(&json!(["VerifiableCredential", "UniversityDegreeCredential"]))
        );
    }

    #[test]
    fn dotted_and_rooted_paths() {
        let doc = document();
        assert_eq!(
            resolve(&doc, "credentialSubject.degree.type"),
            Some(&json!("BachelorDegree"))
        );
        assert_eq!(
            resolve(&doc, "$.credentialSubject.id"),
            Some(&json!("did:example:holder"))
        );
        assert_eq!(resolve(&doc, "$"), Some(&doc));
    }

    #[test]
    fn indexed_segments() {
        let doc = document();
        assert_eq!(resolve(&doc, "evidence[1].id"), Some(&json!("e-2")));
        assert_eq!(resolve(&doc, "evidence.0.id"), Some(&json!("e-1")));
        assert_eq!(resolve(&doc, "evidence[5].id"), None);
        assert_eq!(resolve(&doc, "evidence[x]"), None);
    }

    #[test]
    fn json_pointer() {
        let doc = document();
        assert_eq!(
            resolve(&doc, "/credentialSubject/degree/type"),
            Some(&json!("BachelorDegree"))
        );
    }

    #[test]
    fn missing_intermediate_key_is_absent() {
        let doc = document();
        assert_eq!(resolve(&doc, "credentialSubject.name.first"), None);
        assert_eq!(resolve(&doc, "credentialSubject.id.length"), None);
        assert_eq!(resolve(&doc, "credentialSubject..id"), None);
        assert_eq!(resolve(&json!(null), "type"), None);
    }
}

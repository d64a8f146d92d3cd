use serde::Serialize;

/// Addon descriptor served at `/` and `/manifest.json`
///
/// Static document: the media client reads it once to learn what this addon
/// can answer (stream lookups for movie/series ids with the `tt` prefix).
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub resources: Vec<String>,
    pub types: Vec<String>,
    pub catalogs: Vec<ManifestCatalog>,
    #[serde(rename = "idPrefixes")]
    pub id_prefixes: Vec<String>,
}

/// Catalog entry in the addon descriptor (this addon publishes none)
#[derive(Debug, Clone, Serialize)]
pub struct ManifestCatalog {
    #[serde(rename = "type")]
    pub catalog_type: String,
    pub id: String,
    pub name: String,
}

impl Manifest {
    /// Build the addon descriptor
    ///
    /// Identical output for every request; version tracks the crate.
    pub fn new() -> Self {
        Self {
            id: "community.moviebox".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: "Moviebox".to_string(),
            description: "Resolves IMDb ids to playable Moviebox streams".to_string(),
            resources: vec!["stream".to_string()],
            types: vec!["movie".to_string(), "series".to_string()],
            catalogs: Vec::new(),
            id_prefixes: vec!["tt".to_string()],
        }
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_is_version_stable() {
        let manifest = Manifest::new();

        assert_eq!(manifest.resources, vec!["stream"]);
        assert_eq!(manifest.types, vec!["movie", "series"]);
        assert_eq!(manifest.id_prefixes, vec!["tt"]);
        assert!(manifest.catalogs.is_empty());
        assert_eq!(manifest.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_manifest_serializes_with_camel_case_prefixes() {
        let json = serde_json::to_value(Manifest::new()).expect("serialize manifest");

        assert!(json.get("idPrefixes").is_some());
        assert_eq!(json["catalogs"], serde_json::json!([]));
        assert_eq!(json["resources"], serde_json::json!(["stream"]));
    }
}

// ABOUTME: Wire and domain models for the recipe catalogue
// ABOUTME: Recipe snapshots, stable recipe identity, and the paginated response envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// A recipe as served by the catalogue API.
///
/// Recipes are immutable snapshots: the client renders them and stores
/// copies in favorites, but never writes back to the catalogue. Every
/// field except `title` is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    /// Server-assigned numeric id. Present in the upstream schema but not
    /// reliably stable across reloads, so identity goes through [`RecipeId`].
    #[serde(default)]
    pub id: Option<i64>,
    /// Recipe title, also the display name
    pub title: String,
    /// Cuisine name for the filter control
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Aggregate rating, 0.0 to 5.0
    #[serde(default)]
    pub rating: Option<f64>,
    /// Total time in minutes
    #[serde(default)]
    pub total_time: Option<u32>,
    /// Preparation time in minutes
    #[serde(default)]
    pub prep_time: Option<u32>,
    /// Cooking time in minutes
    #[serde(default)]
    pub cook_time: Option<u32>,
    /// Calories extracted from the nutrient map upstream
    #[serde(default)]
    pub calories: Option<f64>,
    /// Loosely typed nutrient map; values may be numbers or strings
    /// like `"431 kcal"`
    #[serde(default)]
    pub nutrients: BTreeMap<String, serde_json::Value>,
    /// Servings the quantities are written for; upstream sometimes sends
    /// `"8 servings"` instead of a number
    #[serde(default, deserialize_with = "deserialize_serves")]
    pub serves: Option<u32>,
    /// Ordered ingredient lines
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Ordered instruction steps
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Link to the original recipe
    #[serde(default)]
    pub url: Option<String>,
}

impl Recipe {
    /// Stable identity for favorites membership and cross-view recognition
    #[must_use]
    pub fn recipe_id(&self) -> RecipeId {
        RecipeId::for_recipe(self)
    }

    /// Servings used as the scaling baseline; defaults to 4 when the
    /// catalogue does not specify one
    #[must_use]
    pub fn serves_or_default(&self) -> u32 {
        self.serves.unwrap_or(crate::DEFAULT_SERVES)
    }
}

/// Accept `serves` as either an integer or a string with a leading
/// integer (`"8 servings"`). Anything else becomes `None`.
fn deserialize_serves<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
        Other(de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => {
            let digits: String = s.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        Some(Raw::Other(_)) | None => None,
    })
}

/// Stable recipe identifier.
///
/// Prefers the server-assigned id; when absent, derives a content digest
/// from the title and source URL. Titles stay display-only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipeId {
    /// Server-assigned numeric id
    Server(i64),
    /// Hex digest of `sha256(title ++ "\n" ++ url)`, truncated to 16 bytes
    Digest(String),
}

impl RecipeId {
    /// Compute the stable identifier for a recipe snapshot
    #[must_use]
    pub fn for_recipe(recipe: &Recipe) -> Self {
        recipe.id.map_or_else(
            || {
                let mut hasher = Sha256::new();
                hasher.update(recipe.title.as_bytes());
                hasher.update(b"\n");
                hasher.update(recipe.url.as_deref().unwrap_or("").as_bytes());
                let digest = hasher.finalize();
                Self::Digest(hex::encode(&digest[..16]))
            },
            Self::Server,
        )
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server(id) => write!(f, "{id}"),
            Self::Digest(hex) => write!(f, "{hex}"),
        }
    }
}

/// Paginated response envelope wrapping a slice of recipes.
///
/// Invariants (maintained by the server, relied on by the controller):
/// `1 <= page <= pages` when `total > 0`, and `data.len() <= limit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope {
    /// Recipes on this page
    pub data: Vec<Recipe>,
    /// 1-based page number
    pub page: u32,
    /// Total number of pages
    pub pages: u32,
    /// Total matching recipes across all pages
    pub total: u64,
    /// Page size the server applied
    #[serde(default)]
    pub limit: u32,
}

impl PageEnvelope {
    /// An empty envelope, used when a fetch fails and the view degrades
    /// to an empty result set
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            data: Vec::new(),
            page: 1,
            pages: 0,
            total: 0,
            limit: 0,
        }
    }
}

/// Persisted favorite entry: the recipe snapshot plus when it was saved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// The recipe snapshot as it looked when favorited
    pub recipe: Recipe,
    /// When the entry was saved
    pub saved_at: chrono::DateTime<chrono::Utc>,
}

impl FavoriteEntry {
    /// Snapshot a recipe into a favorite entry timestamped now
    #[must_use]
    pub fn new(recipe: Recipe) -> Self {
        Self {
            recipe,
            saved_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn minimal(title: &str) -> Recipe {
        Recipe {
            title: title.to_owned(),
            ..Recipe::default()
        }
    }

    #[test]
    fn test_recipe_id_prefers_server_id() {
        let mut recipe = minimal("Pad Thai");
        recipe.id = Some(42);
        assert_eq!(recipe.recipe_id(), RecipeId::Server(42));
    }

    #[test]
    fn test_recipe_id_digest_is_stable() {
        let a = minimal("Pad Thai");
        let b = minimal("Pad Thai");
        assert_eq!(a.recipe_id(), b.recipe_id());
        assert_ne!(a.recipe_id(), minimal("Pad See Ew").recipe_id());
    }

    #[test]
    fn test_serves_accepts_number_or_text() {
        let from_number: Recipe =
            serde_json::from_str(r#"{"title":"t","serves":8}"#).unwrap();
        assert_eq!(from_number.serves, Some(8));

        let from_text: Recipe =
            serde_json::from_str(r#"{"title":"t","serves":"8 servings"}"#).unwrap();
        assert_eq!(from_text.serves, Some(8));

        let garbage: Recipe =
            serde_json::from_str(r#"{"title":"t","serves":"a few"}"#).unwrap();
        assert_eq!(garbage.serves, None);
    }

    #[test]
    fn test_envelope_decodes_without_limit() {
        let raw = r#"{"data":[],"page":1,"pages":0,"total":0}"#;
        let envelope: PageEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.limit, 0);
    }
}

//! Preloaded slug → document lookup.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use strongroom_core::config::registry::DocumentEntry;
use strongroom_core::types::Slug;
use strongroom_core::{AppError, AppResult};
use strongroom_entity::{AccessControlledDocument, Tier};

/// Immutable registry of deliverable documents, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct DocumentRegistry {
    documents: HashMap<Slug, Arc<AccessControlledDocument>>,
}

impl DocumentRegistry {
    /// Builds the registry from configuration entries.
    ///
    /// Fails with a configuration error on an invalid slug, an unknown or
    /// empty tier list, or a duplicate slug.
    pub fn from_entries(entries: &[DocumentEntry]) -> AppResult<Self> {
        let documents = entries
            .iter()
            .map(document_from_entry)
            .collect::<AppResult<Vec<_>>>()?;
        Self::from_documents(documents)
    }

    /// Builds the registry from ready-made documents.
    pub fn from_documents(
        documents: impl IntoIterator<Item = AccessControlledDocument>,
    ) -> AppResult<Self> {
        let mut map = HashMap::new();
        for doc in documents {
            match map.entry(doc.slug().clone()) {
                Entry::Occupied(_) => {
                    return Err(AppError::configuration(format!(
                        "Duplicate document slug '{}'",
                        doc.slug()
                    )));
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(Arc::new(doc));
                }
            }
        }
        Ok(Self { documents: map })
    }

    /// The document registered under `slug`.
    pub fn lookup(&self, slug: &Slug) -> Option<Arc<AccessControlledDocument>> {
        self.documents.get(slug).cloned()
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// All registered documents, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<AccessControlledDocument>> {
        self.documents.values()
    }
}

fn document_from_entry(entry: &DocumentEntry) -> AppResult<AccessControlledDocument> {
    let slug = Slug::parse(&entry.slug).map_err(|e| {
        AppError::configuration(format!("Document '{}': {}", entry.slug, e.message))
    })?;
    let tiers = entry
        .tiers
        .iter()
        .map(|raw| raw.parse::<Tier>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::configuration(format!("Document '{slug}': {}", e.message)))?;

    let title = if entry.title.is_empty() {
        slug.to_string()
    } else {
        entry.title.clone()
    };

    Ok(AccessControlledDocument::new(slug, title, tiers)?
        .with_explicit_grant(entry.requires_explicit_grant)
        .with_preview_only(entry.preview_only)
        .with_private(entry.private))
}

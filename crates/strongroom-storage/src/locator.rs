//! Slug → canonical asset path.

use strongroom_core::types::Slug;

/// Computes asset paths from a file-name template.
///
/// `{slug}` is replaced with the slug and `{SLUG}` with its uppercase
/// form. The result is relative to the asset store root and never contains
/// caller-supplied text beyond the validated slug.
#[derive(Debug, Clone)]
pub struct AssetLocator {
    template: String,
}

impl AssetLocator {
    /// Creates a locator for `template`, e.g. `"{slug}.pdf"`.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Relative path of the asset for `slug`.
    pub fn locate(&self, slug: &Slug) -> String {
        self.template
            .replace("{slug}", slug.as_str())
            .replace("{SLUG}", &slug.as_str().to_uppercase())
    }

    /// File name presented to clients for `slug`.
    pub fn file_name(&self, slug: &Slug) -> String {
        let path = self.locate(slug);
        match path.rsplit_once('/') {
            Some((_, name)) if !name.is_empty() => name.to_string(),
            _ => path,
        }
    }
}

impl Default for AssetLocator {
    fn default() -> Self {
        Self::new("{slug}.pdf")
    }
}

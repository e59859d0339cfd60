//! The fixed set of URLs a generation must hold.

use url::Url;

use crate::Error;

/// Ordered list of absolute URLs cached on install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    urls: Vec<Url>,
}

impl Manifest {
    /// Resolve site-relative paths (e.g. `/styles/main.css`) against an origin.
    pub fn resolve<S: AsRef<str>>(origin: &Url, paths: &[S]) -> Result<Self, Error> {
        let urls = paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                origin
                    .join(path)
                    .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { urls })
    }

    pub fn urls(&self) -> &[Url] {
        &self.urls
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Deploy-time constants handed to the manager at construction.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Name of the current cache generation.
    pub generation: String,
    pub manifest: Manifest,
    /// Document served for failed navigations; always part of the manifest.
    pub offline_page: Url,
}

//! The ordered collection of client libraries produced by a run.

use humansize::{BINARY, format_size};

use crate::config::SortOptions;
use crate::sorting::sort_libraries;

use super::ClientLibrary;

/// An ordered collection of client libraries.
///
/// Wraps the scanner's output so renderers can share summary helpers.
#[derive(Clone, Debug, Default)]
pub struct ClientLibraries(Vec<ClientLibrary>);

impl From<Vec<ClientLibrary>> for ClientLibraries {
    fn from(libraries: Vec<ClientLibrary>) -> Self {
        Self(libraries)
    }
}

impl ClientLibraries {
    /// Reorder the collection according to `sort_opts`.
    pub fn sort(&mut self, sort_opts: &SortOptions) {
        sort_libraries(&mut self.0, sort_opts);
    }

    /// Sum of the compressed sizes of all libraries, in bytes.
    #[must_use]
    pub fn total_compressed_size(&self) -> u64 {
        self.0.iter().map(|lib| lib.compressed_size).sum()
    }

    /// Total compressed size formatted for humans (e.g. `12.3 KiB`).
    #[must_use]
    pub fn total_compressed_size_formatted(&self) -> String {
        format_size(self.total_compressed_size(), BINARY)
    }

    /// Number of libraries in the collection.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the collection holds no libraries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The libraries in their current order.
    #[must_use]
    pub fn as_slice(&self) -> &[ClientLibrary] {
        &self.0
    }

    /// Iterate over the libraries in their current order.
    pub fn iter(&self) -> std::slice::Iter<'_, ClientLibrary> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ClientLibraries {
    type Item = &'a ClientLibrary;
    type IntoIter = std::slice::Iter<'a, ClientLibrary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

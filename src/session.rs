//! Scoped use of a MIB source
//!
//! A [`Session`] initializes a source, registers search paths, and tears the
//! source down again when dropped. It holds the source's only mutable borrow
//! for its whole lifetime, so one source cannot serve two operations at once.

use crate::source::{MibSource, RawModule, SourceError};
use std::path::Path;
use tracing::debug;

pub struct Session<'a, S: MibSource + ?Sized> {
    source: &'a mut S,
}

impl<'a, S: MibSource + ?Sized> Session<'a, S> {
    /// Reset `source` and register `search_paths` in order.
    pub fn open<P: AsRef<Path>>(source: &'a mut S, search_paths: &[P]) -> Result<Self, SourceError> {
        source.initialize()?;
        for path in search_paths {
            debug!("Search path {}", path.as_ref().display());
            source.append_search_path(path.as_ref());
        }
        Ok(Self { source })
    }

    /// Load a module and its dependencies.
    pub fn load(&mut self, name: &str) -> Result<&RawModule, SourceError> {
        self.source.load_module(name)
    }

    pub fn source(&self) -> &S {
        &*self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut *self.source
    }
}

impl<S: MibSource + ?Sized> Drop for Session<'_, S> {
    fn drop(&mut self) {
        self.source.teardown();
    }
}

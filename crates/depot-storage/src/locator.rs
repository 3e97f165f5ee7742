// Copyright 2026 The Depot Authors
// SPDX-License-Identifier: Apache-2.0

//! Download locator strategies.
//!
//! A locator is a derived, non-persisted string a caller uses to retrieve
//! content out of band. The reference deployment hands out direct
//! filesystem references; a networked deployment would plug in a signed,
//! time-bounded URL strategy instead. The strategy only formats the
//! locator; existence checking and content transfer live elsewhere.

use std::path::Path;

/// Strategy for deriving a retrieval locator from an object's path.
pub trait LocatorStrategy: Send + Sync + 'static {
    /// Produce an opaque locator string for the object at `path`.
    fn locator(&self, bucket: &str, name: &str, path: &Path) -> String;
}

/// Direct filesystem locators: `file://<path>`.
pub struct FileLocator;

impl LocatorStrategy for FileLocator {
    fn locator(&self, _bucket: &str, _name: &str, path: &Path) -> String {
        format!("file://{}", path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_locator() {
        let locator = FileLocator.locator("b1", "o1", Path::new("/data/b1/o1"));
        assert_eq!(locator, "file:///data/b1/o1");
    }
}

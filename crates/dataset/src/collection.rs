//! Ordered dataset collection for one source file.

use chrono::{DateTime, Utc};

use crate::source::GridSource;

/// The ordered datasets decoded from one source file.
///
/// Order is significant: resolution scans sources front to back and the
/// first match wins. The order is fixed for the file's lifetime.
pub struct DatasetCollection {
    sources: Vec<Box<dyn GridSource>>,
    reference_time: Option<DateTime<Utc>>,
}

impl DatasetCollection {
    pub fn new(sources: Vec<Box<dyn GridSource>>, reference_time: Option<DateTime<Utc>>) -> Self {
        Self {
            sources,
            reference_time,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn GridSource> {
        self.sources.iter().map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Model run/reference time, when the file declares one.
    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.reference_time
    }
}

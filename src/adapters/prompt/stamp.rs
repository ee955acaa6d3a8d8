//! Stamp sources.

use uuid::Uuid;

use crate::domain::foundation::Timestamp;
use crate::ports::{RenderStamp, StampSource};

/// Reads the system clock and derives a fresh document identifier.
///
/// Identifiers look like `sp-1705314600000-3f2a9c1d`: the generation time in
/// Unix milliseconds plus eight random hex digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemStampSource;

impl StampSource for SystemStampSource {
    fn next_stamp(&self) -> RenderStamp {
        let now = Timestamp::now();
        let suffix = Uuid::new_v4().simple().to_string();
        RenderStamp::new(now, format!("sp-{}-{}", now.as_unix_millis(), &suffix[..8]))
    }
}

/// Returns the same stamp every time. For tests and reproducible output.
#[derive(Debug, Clone)]
pub struct FixedStampSource {
    stamp: RenderStamp,
}

impl FixedStampSource {
    pub fn new(stamp: RenderStamp) -> Self {
        Self { stamp }
    }
}

impl StampSource for FixedStampSource {
    fn next_stamp(&self) -> RenderStamp {
        self.stamp.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_stamp_ids_embed_generation_time() {
        let stamp = SystemStampSource.next_stamp();
        let millis = stamp.generated_at.as_unix_millis().to_string();

        assert!(stamp.document_id.starts_with(&format!("sp-{}-", millis)));
        assert_eq!(stamp.document_id.rsplit('-').next().unwrap().len(), 8);
    }

    #[test]
    fn system_stamps_are_unique() {
        let a = SystemStampSource.next_stamp();
        let b = SystemStampSource.next_stamp();
        assert_ne!(a.document_id, b.document_id);
    }

    #[test]
    fn fixed_stamp_is_repeatable() {
        let stamp = RenderStamp::new(Timestamp::from_unix_secs(10), "sp-fixed");
        let source = FixedStampSource::new(stamp);
        assert_eq!(source.next_stamp(), source.next_stamp());
    }
}

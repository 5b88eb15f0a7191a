/*!
Contains configuration information for merging a read pair.
Typical usage is to the use the builder to construct the config, e.g.
```
use readpair_con::alignment::AffineScoring;
use readpair_con::merge_config::{MergeConfig, MergeConfigBuilder};
let config: MergeConfig = MergeConfigBuilder::default()
    .quality_threshold(30)
    .scoring(AffineScoring { gap_open: -3, ..Default::default() })
    .build()
    .unwrap();
assert_eq!(config.min_segment_len, 20);
```
*/

use crate::alignment::AffineScoring;

/// Contains configuration information for merging a read pair.
/// See the module documentation for builder usage.
#[derive(derive_builder::Builder, Clone, Debug)]
#[builder(default)]
pub struct MergeConfig {
    /// Minimum length of a high quality segment for a read to be usable
    pub min_segment_len: usize,
    /// Confidences must be strictly above this value to count as high quality
    pub quality_threshold: u8,
    /// When only one read is usable, the maximum fraction of masked `N` bases before the merge fails
    pub max_ambiguous_fraction: f64,
    /// Scoring for the built-in local aligner
    pub scoring: AffineScoring
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            // anything shorter is not worth aligning
            min_segment_len: 20,
            // typical cutoff for trace confidences
            quality_threshold: 40,
            // a lone read with more ambiguity than this is not trustworthy
            max_ambiguous_fraction: 0.15,
            // match=1, mismatch=0, open=-5, extend=-10
            scoring: AffineScoring::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = MergeConfigBuilder::default().build().unwrap();
        assert_eq!(config.min_segment_len, 20);
        assert_eq!(config.quality_threshold, 40);
        assert_eq!(config.max_ambiguous_fraction, 0.15);
        assert_eq!(config.scoring, AffineScoring::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = MergeConfigBuilder::default()
            .min_segment_len(4)
            .max_ambiguous_fraction(0.5)
            .build().unwrap();
        assert_eq!(config.min_segment_len, 4);
        assert_eq!(config.quality_threshold, 40);
        assert_eq!(config.max_ambiguous_fraction, 0.5);
    }
}

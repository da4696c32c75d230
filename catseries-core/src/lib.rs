//! catseries core — normalize, merge and aggregate three category time series.
//!
//! This crate contains the whole pipeline:
//! - Source providers (HTTP, local files) and the all-or-nothing fetch barrier
//! - One adapter per source mapping raw items to canonical records
//! - Normalizer, sort-then-fold merger, and category grouper with subtotals
//! - Chart-ready payloads, CSV/JSON export, and input fingerprints

pub mod adapters;
pub mod config;
pub mod domain;
pub mod export;
pub mod fingerprint;
pub mod group;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod presentation;
pub mod source;

pub use config::{ChartOptions, Config, ConfigError, SourceLocations};
pub use domain::{
    CanonicalRecord, GroupedCategory, GroupedSeries, MergedRecord, SeriesPoint, SourceId,
};
pub use pipeline::{process, report, run, PipelineError, ProcessedSeries, RunReport};
pub use source::{acquire, FetchError, FileProvider, HttpProvider, RawPayloads, SourceProvider};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: pipeline types can cross thread boundaries.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<CanonicalRecord>();
        require_sync::<CanonicalRecord>();
        require_send::<GroupedSeries>();
        require_sync::<GroupedSeries>();
        require_send::<RawPayloads>();
        require_sync::<RawPayloads>();
        require_send::<RunReport>();
        require_sync::<RunReport>();
        require_send::<PipelineError>();
        require_sync::<PipelineError>();
        require_send::<HttpProvider>();
        require_sync::<HttpProvider>();
        require_send::<FileProvider>();
        require_sync::<FileProvider>();
    }
}

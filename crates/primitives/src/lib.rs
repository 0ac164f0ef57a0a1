#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/peerval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod symbol;
pub use symbol::Symbol;

mod metrics;
pub use metrics::MetricsRecord;

mod statistics;
pub use statistics::{PeerMetric, PeerStatisticEntry, PeerStatistics};

mod valuation;
pub use valuation::{
    MethodLabel, ValuationComponent, ValuationComponents, ValuationMethod, ValuationResult,
};

/// Re-export the timestamp type used by results.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

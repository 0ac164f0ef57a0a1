#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/peerval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod aggregate;
pub use aggregate::{PeerAggregator, aggregate_peer_statistics};

mod quality;
pub use quality::{QualityAdjustment, QualityScorer, quality_multiplier};

mod methods;
pub use methods::{confidence_for, sanity_check, value_method};

mod composite;
pub use composite::{Blend, blend, guard_price};

mod insights;
pub use insights::{INSUFFICIENT_DATA, explain};

mod valuator;
pub use valuator::{PeerValuator, TargetValuation, value_target};

mod service;
pub use service::ValuationService;

mod config;
pub use config::{AggregationConfig, QualityConfig, SanityConfig, ValuationConfig};

mod error;
pub use error::ValuationError;

/// Re-export commonly used types.
pub mod prelude {
    pub use peerval_traits::{MetricsProvider, PeerProvider};

    pub use super::{PeerValuator, ValuationConfig, ValuationError, ValuationService};
}

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/peerval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod stats;
pub use stats::{Summary, median, quantile, round_to, sample_std, sorted_finite};

mod outliers;
pub use outliers::{IqrFilter, retain_within};

mod error;
pub use error::MathError;

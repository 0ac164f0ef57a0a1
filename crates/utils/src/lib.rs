#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/peerval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod cache;
pub use cache::{CachedMetricsProvider, DEFAULT_TTL_SECS, TtlCache};

mod providers;
pub use providers::{JsonMetricsProvider, StaticPeerProvider};

mod table;
pub use table::peer_frame;

mod error;
pub use error::UtilsError;

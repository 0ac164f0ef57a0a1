//! # peerval
//!
//! Peer-multiple equity valuation.
//!
//! This crate provides a unified interface to the peerval workspace.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Core type definitions
//! - `traits`: Data provider traits
//! - `math`: Order statistics and outlier filtering
//! - `model`: Valuation engine
//! - `utils`: Providers, caching and tables
//!
//! ## Example
//!
//! ```rust,ignore
//! use peerval::model::ValuationService;
//! use peerval::utils::{JsonMetricsProvider, StaticPeerProvider};
//!
//! let metrics = JsonMetricsProvider::from_path("metrics.json")?;
//! let peers = StaticPeerProvider::from_path("peers.json")?;
//! let result = ValuationService::new(metrics, peers).value("AAPL")?;
//! result.print_summary();
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/peerval/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use peerval_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use peerval_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use peerval_math as math;
#[cfg(feature = "model")]
#[doc(inline)]
pub use peerval_model as model;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use peerval_utils as utils;

//! Output format implementations for syntax trees and token streams
//!
//! Treeviz is the only hand-written format; JSON and YAML come straight from
//! the serde derives on tokens and nodes (see [`crate::kiwi::processor`]).

pub mod treeviz;

pub use treeviz::to_treeviz_str;

//! # kiwi
//!
//! Parsing core for the kiwi language front end: a packrat parser over a
//! buffered token stream and a syntax tree whose nodes locate themselves.
//!
//! The pipeline is `source -> lexing -> parsing -> ast`, see [kiwi::parsing]
//! for the entry points.

pub mod kiwi;

//! Main module for kiwi library functionality

pub mod ast;
pub mod config;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod processor;
pub mod testing;

//! Node types of the kiwi grammar
//!
//! One module per production family. Every composite node derives its span
//! at construction from the children its schema declares; [`TokenWrapper`] is
//! the only leaf.

pub mod declaration;
pub mod file;
pub mod header;
pub mod identifier;
pub mod token_wrapper;
pub mod types;

pub use declaration::{Declaration, FunctionDeclaration};
pub use file::File;
pub use header::{ImportAlias, ImportHeader, ImportSuffix, ImportWildcard, PackageHeader};
pub use identifier::Identifier;
pub use token_wrapper::TokenWrapper;
pub use types::{ParenthesizedType, Type, UserType};

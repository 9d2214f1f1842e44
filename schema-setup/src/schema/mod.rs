//! Table metadata, the schema retriever contract and its DDL-backed implementation

mod ddl_parser;
mod metadata;
mod retriever;

pub use ddl_parser::*;
pub use metadata::*;
pub use retriever::*;

//! Code generation module

mod install_schema;
mod naming;
mod template;
mod type_resolver;

pub use install_schema::*;
pub use naming::*;
pub use template::*;
pub use type_resolver::*;

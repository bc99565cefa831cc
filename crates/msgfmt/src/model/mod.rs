//! Compiled message data model.
//!
//! Messages arrive already compiled into a tree of literals, references,
//! function calls and selections. This module defines that tree and the
//! resource structure that groups messages by path. Parsing message syntax is
//! left to an external compiler; the types here deserialize from its JSON
//! output.

pub mod ast;
mod resource;

pub use ast::*;
pub use resource::{Entry, MessageGroup, Resource};

//! Query model and grammar compiler for the odata-fluent client.
//!
//! This crate holds the pure data side of the system: literal values, the
//! clause model, the binding store, the query state record, and the grammar
//! that compiles that state into an OData v4 URL query string. No I/O and no
//! async; compilation is a deterministic transformation.

mod binding;
mod clause;
mod grammar;
mod operator;
mod order;
mod state;
mod value;

pub use binding::{BindingCategory, Bindings};
pub use clause::{Boolean, Clause};
pub use grammar::{Grammar, ODataV4Grammar};
pub use operator::Operator;
pub use order::{Order, OrderDirection};
pub use state::{QueryState, Reference};
pub use value::Value;

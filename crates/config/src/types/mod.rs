//! Typed configuration values.
//!
//! Responsibilities:
//! - Define the closed `Value` universe produced by casters and stored in snapshots.
//! - Provide symbolic names (`Atom`), IP/CIDR literals and late-bound module references.
//! - Render values both for diagnostics (`Display`) and as natural JSON (`Value::to_json`).
//!
//! Does NOT handle:
//! - Converting raw strings into values (see `cast` module).
//! - Post-cast checks such as CIDR prefix bounds (see `validate` module).
//!
//! Invariants:
//! - Values are plain data: cloning a value never touches the process environment.
//! - `Value` serde representation is tagged so schema defaults round-trip losslessly.

mod address;
mod module_ref;
mod value;

pub use address::{Address, IpValue};
pub use module_ref::{ModuleRef, ModuleRegistry, UnknownModule};
pub use value::{Atom, MapKey, Value, ValueKind};

//!
//! moonlet-std-core - Core Value Model
//!
//! This crate provides the types shared by the runtime support layer and by
//! the hosts that embed it:
//!
//! - `Value` and `Number` for dynamically typed script values
//! - `ResultSequence` for (possibly multi-valued) expression results
//! - `HostType` / `TypeHandle` describing the static host type universe
//! - `Table` (the seam to the script table implementation) and `ValueTable`
//! - `TypedArray` for homogeneous host arrays
//! - `HostObject` for opaque host data carried through script code
//!
//! Every type here is `Send + Sync`: values cross evaluation threads freely.
//!

pub mod array;
pub mod number;
pub mod object;
pub mod results;
pub mod table;
pub mod types;
pub mod value;

pub use array::*;
pub use number::*;
pub use object::*;
pub use results::*;
pub use table::*;
pub use types::*;
pub use value::*;

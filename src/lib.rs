// Lets `#[derive(Equivalent)]` name `::facsimile` from inside this crate too.
extern crate self as facsimile;

pub mod archive;
pub use archive::{decode, encode, Archive};

pub mod copy;
pub use copy::{copy, CopyMode, Replicate};

pub mod employee;
pub use employee::Employee;

pub mod equivalence;
pub use equivalence::{
    check_hash_contract, equivalent_any, try_equivalent_any, ContentHash, Equivalence,
    HashContractViolation, Triple,
};

pub mod properties;
pub use properties::Properties;

pub mod result;
pub use result::{DecodeError, FacsimileError, FacsimileResult};

pub mod shape;
pub use shape::{Circle, Drawing, Shape, Triangle};

pub use facsimile_derive::Equivalent;

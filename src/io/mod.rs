//! I/O for the on-disk field-file format.
//!
//! This module owns the serialization format only; resolving a field name
//! and time tag to a file is the job of the store layer built on top.

mod field_file;

pub use field_file::{
    parse_scalar_field, parse_vector_field, read_scalar_field, read_vector_field,
    write_scalar_field, write_vector_field, FieldFileError, FieldKind,
};

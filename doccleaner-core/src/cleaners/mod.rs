//! Concrete `ValueCleaner` implementations shipped with the library.
//!
//! Hosts register additional cleaners on a `CleanerRegistry`; only the
//! reference operations live here.

pub mod builtin;

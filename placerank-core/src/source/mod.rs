//! Collaborators that feed the corpus store.
//!
//! The ranking engine never talks to databases or the network itself.
//! Implementers of [`CatalogSource`], [`ImageSource`] and
//! [`ReferenceSource`] hand over fully materialised data once at startup;
//! any joins or aggregation happen on their side of the boundary.
//!
//! Errors are reported as [`SourceError`] values carrying enough context for
//! the startup caller to explain what failed.

mod error;
mod traits;

pub use error::SourceError;
pub use traits::{CatalogSource, ImageSource, ReferenceSource};

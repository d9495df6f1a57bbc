//! In-memory semantic-graph snapshot backing PedalGrid metadata extraction.

mod document;
mod error;
mod locate;
mod node;
mod snapshot;
mod vocab;

pub use error::*;
pub use locate::*;
pub use node::*;
pub use snapshot::*;
pub use vocab::*;

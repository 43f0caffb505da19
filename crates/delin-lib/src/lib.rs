pub mod annotation;
pub mod error;
pub mod io;
pub mod metrics;
pub mod pipeline;
pub mod tags;

pub use annotation::*;
pub use error::{DelineationError, ErrorBody, ErrorClass};
pub use pipeline::*;

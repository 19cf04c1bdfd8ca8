//! Library side of the `metaext` command line tool.

pub mod logging;
pub mod pipeline;
pub mod types;

mod feed;
mod incident;
mod number;

pub use feed::*;
pub use incident::*;

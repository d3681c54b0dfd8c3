mod polling;
pub use polling::*;

mod signal;
pub use signal::*;

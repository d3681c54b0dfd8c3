mod artifact;
pub use artifact::*;

mod codec;
pub use codec::*;

mod encoding;
pub use encoding::*;

mod resolver;
pub use resolver::*;

mod estimation;
pub use estimation::*;

mod quote;
pub use quote::*;

mod defaults;
mod result;
mod suite;
mod types;

pub use defaults::*;
pub use result::*;
pub use suite::*;
pub use types::*;

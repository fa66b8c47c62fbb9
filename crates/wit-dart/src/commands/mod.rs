pub mod generate;
pub mod watch;

pub use generate::*;
pub use watch::*;

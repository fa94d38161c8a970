pub mod input;
pub mod partition;
pub mod script;
pub mod submit;

pub use input::*;
pub use partition::*;
pub use script::*;
pub use submit::*;

pub mod analysis;
pub mod location;
pub mod macros;
pub mod moon;
pub mod score;
pub mod visit;
pub mod weather;

pub use analysis::*;
pub use location::*;
pub use moon::*;
pub use score::*;
pub use visit::*;
pub use weather::*;

mod recommendation;
mod site;
mod stop;

pub use recommendation::*;
pub use site::*;
pub use stop::*;

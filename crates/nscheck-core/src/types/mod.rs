mod asset;
mod credentials;
mod finding;
mod organization;
mod zone;

pub use asset::*;
pub use credentials::*;
pub use finding::*;
pub use organization::*;
pub use zone::*;

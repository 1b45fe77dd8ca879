pub mod analysis;
pub mod document;
pub mod response;

pub use analysis::*;
pub use document::*;
pub use response::*;

pub mod extraction_handlers;
pub mod match_handlers;
pub mod resume_handlers;
pub mod system_handlers;

pub use extraction_handlers::*;
pub use match_handlers::*;
pub use resume_handlers::*;
pub use system_handlers::*;

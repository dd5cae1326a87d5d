pub mod session_record;

pub use session_record::*;

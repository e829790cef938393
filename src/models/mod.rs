pub mod alert;
pub mod report;

pub use alert::*;
pub use report::*;

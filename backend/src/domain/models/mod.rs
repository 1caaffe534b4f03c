pub mod columns;
pub mod report;
pub mod week;

pub use columns::*;
pub use report::*;
pub use week::*;

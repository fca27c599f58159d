pub mod assemble;
pub mod partition;
pub mod sheet;

pub mod comments;
pub mod extract;
pub mod scanner;

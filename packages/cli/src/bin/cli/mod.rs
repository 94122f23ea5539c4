pub mod logs;
pub mod select;
pub mod shell;
pub mod sso;
pub mod target;

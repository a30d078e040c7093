pub mod notice;
pub mod screen;
pub mod shell;

pub use shell::Shell;

pub mod conf;
pub mod dtmf;
pub mod shortcut;

pub mod animation;
pub mod input;
pub mod mailbox;
pub mod time;

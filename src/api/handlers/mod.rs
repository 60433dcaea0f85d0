pub mod content;
pub mod events;
pub mod fees;
pub mod root;
pub mod submissions;

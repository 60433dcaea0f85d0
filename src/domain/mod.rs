pub mod intake;
pub mod content;
pub mod event;
pub mod fee;

pub use intake::*;
pub use content::*;
pub use event::*;
pub use fee::*;

pub mod board;
pub mod card;
pub mod label;
pub mod list;
pub mod task;
pub mod user;

pub use board::*;
pub use card::*;
pub use label::*;
pub use list::*;
pub use task::*;
pub use user::*;

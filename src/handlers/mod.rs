pub mod auth;
pub mod boards;
pub mod cards;
pub mod labels;
pub mod lists;
pub mod tasks;
pub mod users;

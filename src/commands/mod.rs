pub mod add;
pub mod check;
pub mod complete;
pub mod deps;
pub mod list;
pub mod next;
pub mod show;

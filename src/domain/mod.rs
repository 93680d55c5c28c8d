pub mod shared;
pub mod speech;
pub mod story;

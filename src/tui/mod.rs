pub mod input;
pub mod keyboard;
pub mod lane;
pub mod mode;
pub mod view;

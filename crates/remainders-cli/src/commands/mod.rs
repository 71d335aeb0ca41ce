pub mod copy;
pub mod input;
pub mod interactive;
pub mod output;
pub mod set;
pub mod show;
pub mod url;

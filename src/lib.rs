mod modules;
mod sys;

pub use sys::*;

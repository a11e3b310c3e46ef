mod module;

mod ping;

pub use module::ModCore;

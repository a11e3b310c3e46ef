mod fanout;
mod globalban;
mod module;

pub use module::ModModeration;

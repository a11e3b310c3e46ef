#[cfg(feature = "modcore")]
mod core;
#[cfg(feature = "modmod")]
mod moderation;
mod register;

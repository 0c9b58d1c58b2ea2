pub mod impl_fake;
pub mod impl_file;
pub mod impl_memory;
pub mod interface;

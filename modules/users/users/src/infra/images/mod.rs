pub mod local;

pub use local::LocalImageStore;

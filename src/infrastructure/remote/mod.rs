pub mod error;
pub mod http_backend;
pub mod object_storage;

pub use http_backend::HttpRemoteBackend;
pub use object_storage::HttpMediaStorage;

pub mod connectivity;
pub mod media_storage;
pub mod mirror_store;
pub mod mutation_queue;
pub mod pusher;
pub mod remote_backend;

pub use connectivity::ConnectivityMonitor;
pub use media_storage::MediaStorage;
pub use mirror_store::MirrorStore;
pub use mutation_queue::MutationQueue;
pub use pusher::MutationPusher;
pub use remote_backend::RemoteBackend;

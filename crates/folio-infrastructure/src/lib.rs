//! # Folio Infrastructure
//!
//! Adapters behind the core and security ports: the BaaS HTTP client,
//! in-memory stores, the file session store and the image cropper.

pub mod backend;
pub mod memory;
pub mod session;
pub mod media;

pub use backend::{
    remote_repositories, BackendClient, BackendError, RemoteEntityRepository,
    RemoteFileStorage, RemoteIdentityProvider, RemoteMailer,
};
pub use media::RasterCropper;
pub use memory::{memory_repositories, MemoryEntityRepository, MemorySessionStore};
pub use session::FileSessionStore;

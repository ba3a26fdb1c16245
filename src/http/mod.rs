//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → tenant.rs (tenant id from header or host)
//!     → routing::MountResolver (path → ResolvedContext)
//!     → JSON response for the CRUD / representation collaborators
//! ```

pub mod request;
pub mod server;
pub mod tenant;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer, X_MONGO_RESOURCE_PATH};

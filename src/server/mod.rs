//! HTTP server layer for the image search proxy.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │                       GET /api/image                            │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │  handlers   │  │    auth     │  │        routes           │  │
//! │  │ (requests)  │  │  (bearer)   │  │  (router config)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{auth_middleware, AuthError, BearerAuth};
pub use handlers::{
    image_handler, root_handler, ApiError, AppState, ImageResponse, MessageResponse,
    WELCOME_MESSAGE,
};
pub use routes::{create_router, RouterConfig};

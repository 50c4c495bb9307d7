mod assets;
mod health;
pub mod router;
mod state;

pub use assets::{NOSNIFF, VECTOR_IMAGE_CSP, uploads_router};
pub use state::*;

//! Category management.
//!
//! Categories carry a unique name and a unique slug derived from it. New
//! categories always start active.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/category` | List categories (paginated) |
//! | POST | `/api/category` | Create category |
//! | GET | `/api/category/{id}` | Category with its products |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::CategoryService;

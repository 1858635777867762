//! Product management.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/product` | List products with categories (paginated) |
//! | POST | `/api/product` | Create product |
//! | GET | `/api/product/{id}` | Product with category summary |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::ProductService;

mod product;

pub use product::{NewProduct, Product, ProductListing, ProductWithCategory};

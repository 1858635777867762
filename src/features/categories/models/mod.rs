mod category;

pub use category::{Category, CategorySummary, NewCategory};

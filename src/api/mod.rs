pub mod handlers;

pub use handlers::{batch_compare, compare, compare_csv, health_check};

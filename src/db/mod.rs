pub mod pool;
pub mod schema;

pub use pool::create_pool;
pub use schema::{ensure_items_table, is_valid_table_name};

pub mod supabase;
pub mod redis_pool;

pub use supabase::SupabaseClient;
pub use redis_pool::{create_redis_pool, pool_connection};

//! Supabase adapters - PostgREST access to hosted tables.

mod rest_store;

pub use rest_store::SupabaseRestStore;

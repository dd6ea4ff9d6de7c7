//! In-process store implementing every repository port
//!
//! Selected with `DATABASE_URL=memory://`. All tables sit behind one lock and
//! each operation holds it for its whole body, which gives the same
//! all-or-nothing behavior as the PostgreSQL transactions.

mod store;

pub use store::MemoryStore;

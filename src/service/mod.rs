//! Employee directory and attendance ledger operations over the pool.

pub mod attendance;
pub mod employee;

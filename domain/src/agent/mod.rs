//! Agent roles and work units

pub mod role;
pub mod work;

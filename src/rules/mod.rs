//! Standalone court rules that sit beside the session engine

pub mod officers;
pub mod sovereignty;

pub use officers::{auto_reassign, can_be_poached, on_promotion_failure, Officer};
pub use sovereignty::{
    can_peacefully_declare_independence, can_relocate_capital, protection_status,
    ProtectionStatus,
};

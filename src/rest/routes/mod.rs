pub mod buffer;
pub mod health;
pub mod metrics;
pub mod reclaim;
pub mod slots;
pub mod stack;
pub mod usage;

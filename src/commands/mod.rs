pub mod common;
pub mod formatters;
pub mod handoff;
pub mod memory;
pub mod onboarding;

// Domain layer - Core models and pure pipeline functions
pub mod dashboard;
pub mod event;
pub mod filter;
pub mod view;

// Application layer - Use cases and the upstream feed seam
pub mod dashboard_service;
pub mod event_feed;

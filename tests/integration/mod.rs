//! Integration Tests Module
//!
//! End-to-end tests for the trait assessment workspace: scoring engine
//! properties, the attempt flow with midpoint calibration, and resumable
//! progress backed by an in-memory SQLite database.

// Scorer, detector, selector and merger properties
mod scoring_test;

// Attempt flow, calibration insertion and submission
mod assessment_flow_test;

// Progress cache and resume through the service
mod progress_cache_test;

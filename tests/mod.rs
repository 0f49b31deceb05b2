//! Test module organization.
//!
//! This module organizes all integration tests for the MRISC simulator.




/// Trap and access-type tests.
mod common_tests;



/// End-to-end program execution tests.
mod integration_tests;



/// Multiply/Divide Unit tests.
mod mdu_tests;

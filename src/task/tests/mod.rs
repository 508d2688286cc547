//! Unit tests for the task domain.

mod board_tests;

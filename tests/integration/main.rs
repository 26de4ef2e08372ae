//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific path against
//! mock line hardware. All tests run on the host with no real GPIO.

mod capture_tests;
mod mock_line;
mod sample_file_tests;

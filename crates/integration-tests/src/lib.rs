//! Integration tests for the promptpilot workspace live under `tests/`.

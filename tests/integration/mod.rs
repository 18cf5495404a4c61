//! Integration tests for the parameter-set configuration pipeline

mod test_utils;

mod producer_publish;

//! Integration tests for the layered configuration store and the appcfg binary

mod cli_binary;
mod test_utils;

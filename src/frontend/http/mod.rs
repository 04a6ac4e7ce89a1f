pub mod endpoints;
pub mod handler;
pub mod listener;

#[cfg(test)]
mod endpoints_test;

//! Cron jobs that run alongside the HTTP server.

pub mod poll_closing;

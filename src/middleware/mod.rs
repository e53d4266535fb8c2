// SPDX-License-Identifier: MIT

//! Request middleware: JWT auth, rate limiting, security headers.

pub mod auth;
pub mod rate_limit;
pub mod security;

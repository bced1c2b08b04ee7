// SPDX-License-Identifier: MIT

//! Request middleware.

pub mod auth;

pub use auth::{AuthUser, Claims};

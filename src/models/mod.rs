// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod check;
pub mod token;
pub mod user;

pub use check::{Check, CheckMethod, Protocol};
pub use token::Token;
pub use user::User;

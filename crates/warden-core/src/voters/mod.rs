// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Built-in voters.
//!
//! - [`RoleVoter`]: grants attributes that name a role the subject holds
//! - [`OwnerVoter`]: grants attributes on resources the subject owns
//! - [`ExpressionVoter`]: application rules expressed as a closure
//! - [`VoterSpec`]: declarative description of the built-ins for configuration

mod expression;
mod owner;
mod role;
mod spec;

pub use expression::ExpressionVoter;
pub use owner::OwnerVoter;
pub use role::RoleVoter;
pub use spec::VoterSpec;

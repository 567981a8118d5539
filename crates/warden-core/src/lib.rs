// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Voter-based access decision engine.
//!
//! Independent [`Voter`]s each cast a [`Vote`] (grant, deny or abstain) on a
//! requested [`Attribute`]. An [`AccessDecisionManager`] combines the votes
//! with a [`Strategy`] into one boolean decision.
//!
//! # Example
//!
//! ```ignore
//! use warden_core::{AccessDecisionManagerProvider, DecisionSettings, RoleVoter, Subject};
//!
//! let adm = AccessDecisionManagerProvider::new(DecisionSettings::default())
//!     .with_voter(Arc::new(RoleVoter::new(["ADMIN"])))
//!     .provide()?;
//!
//! let subject = Subject::new("alice").with_role("ADMIN");
//! assert!(adm.decide(&subject, &["ADMIN".into()], None).await?);
//! ```

pub mod error;
pub mod manager;
pub mod provider;
pub mod types;
pub mod voter;
pub mod voters;

pub use error::{AccessDeniedError, AccessError, BoxError, ConfigurationError, DecisionError};
pub use manager::{
	AccessDecisionManager, AccessDecisionManagerBuilder, AttributeDecision, CastVote,
	DecisionReport, DecisionSettings,
};
pub use provider::AccessDecisionManagerProvider;
pub use types::{Attribute, Resource, Strategy, Subject, Vote};
pub use voter::Voter;
pub use voters::{ExpressionVoter, OwnerVoter, RoleVoter, VoterSpec};

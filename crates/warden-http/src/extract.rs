// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pulling the subject and resource out of a request.
//!
//! Extractors see the request head only ([`Parts`]); the body is left for the
//! inner service.

use async_trait::async_trait;
use http::request::Parts;
use warden_core::{BoxError, Resource, Subject};

/// Finds the authenticated subject for a request.
///
/// Returning `None` means the request is unauthenticated.
pub trait SubjectExtractor: Send + Sync + 'static {
	fn extract(&self, parts: &Parts) -> Option<Subject>;
}

/// Reads the [`Subject`] placed in request extensions by upstream
/// authentication. This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionSubject;

impl SubjectExtractor for ExtensionSubject {
	fn extract(&self, parts: &Parts) -> Option<Subject> {
		parts.extensions.get::<Subject>().cloned()
	}
}

/// Subject extractor backed by a closure. See [`subject_fn`].
#[derive(Clone)]
pub struct SubjectFn<F>(F);

/// Wraps a closure as a [`SubjectExtractor`].
pub fn subject_fn<F>(f: F) -> SubjectFn<F>
where
	F: Fn(&Parts) -> Option<Subject> + Send + Sync + 'static,
{
	SubjectFn(f)
}

impl<F> SubjectExtractor for SubjectFn<F>
where
	F: Fn(&Parts) -> Option<Subject> + Send + Sync + 'static,
{
	fn extract(&self, parts: &Parts) -> Option<Subject> {
		(self.0)(parts)
	}
}

/// Loads the resource a request targets.
///
/// `Ok(None)` means the check is resource-less. Errors are treated as an
/// internal failure, never as a denial.
#[async_trait]
pub trait ResourceExtractor: Send + Sync + 'static {
	async fn extract(&self, parts: &Parts) -> Result<Option<Resource>, BoxError>;
}

/// Resource extractor backed by a synchronous closure. See [`resource_fn`].
#[derive(Clone)]
pub struct ResourceFn<F>(F);

/// Wraps a closure as a [`ResourceExtractor`].
pub fn resource_fn<F>(f: F) -> ResourceFn<F>
where
	F: Fn(&Parts) -> Result<Option<Resource>, BoxError> + Send + Sync + 'static,
{
	ResourceFn(f)
}

#[async_trait]
impl<F> ResourceExtractor for ResourceFn<F>
where
	F: Fn(&Parts) -> Result<Option<Resource>, BoxError> + Send + Sync + 'static,
{
	async fn extract(&self, parts: &Parts) -> Result<Option<Resource>, BoxError> {
		(self.0)(parts)
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory document storage.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use warden_core::Resource;

/// Resource kind used for access decisions on documents.
pub const DOCUMENT_KIND: &str = "document";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
	pub id: String,
	pub owner_id: String,
	pub title: String,
	pub body: String,
	#[serde(default)]
	pub published: bool,
}

impl Document {
	/// The view of this document that voters see.
	pub fn as_resource(&self) -> Resource {
		Resource::new(DOCUMENT_KIND)
			.with_id(self.id.clone())
			.with_owner(self.owner_id.clone())
			.with_attribute("published", self.published)
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDocument {
	pub title: String,
	#[serde(default)]
	pub body: String,
	#[serde(default)]
	pub published: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentUpdate {
	pub title: Option<String>,
	pub body: Option<String>,
	pub published: Option<bool>,
}

#[derive(Debug, Default)]
pub struct DocumentStore {
	documents: RwLock<BTreeMap<String, Document>>,
	next_id: AtomicU64,
}

impl DocumentStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn insert(&self, owner_id: &str, new: NewDocument) -> Document {
		let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
		let document = Document {
			id: id.clone(),
			owner_id: owner_id.to_string(),
			title: new.title,
			body: new.body,
			published: new.published,
		};
		self.documents.write().await.insert(id, document.clone());
		document
	}

	pub async fn get(&self, id: &str) -> Option<Document> {
		self.documents.read().await.get(id).cloned()
	}

	pub async fn list(&self) -> Vec<Document> {
		self.documents.read().await.values().cloned().collect()
	}

	pub async fn update(&self, id: &str, update: DocumentUpdate) -> Option<Document> {
		let mut documents = self.documents.write().await;
		let document = documents.get_mut(id)?;
		if let Some(title) = update.title {
			document.title = title;
		}
		if let Some(body) = update.body {
			document.body = body;
		}
		if let Some(published) = update.published {
			document.published = published;
		}
		Some(document.clone())
	}

	pub async fn remove(&self, id: &str) -> Option<Document> {
		self.documents.write().await.remove(id)
	}
}

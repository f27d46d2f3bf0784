//! Domain DTOs for the posts API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. The wire name
//! for the owner field is `userId`, so every DTO renames it explicitly.

use serde::{Deserialize, Serialize};

/// Owner id attached to every product created from this client.
pub const DEFAULT_USER_ID: u64 = 1;

/// A single product record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

/// Request payload for creating a product. The service assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProduct {
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

impl NewProduct {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            user_id: DEFAULT_USER_ID,
        }
    }
}

/// Request payload for replacing a product. Every field is sent; the server
/// does not merge partial updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductUpdate {
    pub id: u64,
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

impl ProductUpdate {
    /// Replace `product`'s text while keeping its id and owner.
    pub fn replacing(product: &Product, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: product.id,
            title: title.into(),
            body: body.into(),
            user_id: product.user_id,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{Entity, LedgerError, LedgerResult, ProductId};

/// Catalog entry: descriptive fields plus the reorder threshold.
///
/// Stock-related state (`current_stock`, status) lives on the ledger's
/// `StockRecord`; the catalog only carries what an editor may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub sku: String,
    pub barcode: Option<String>,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
    pub image_url: Option<String>,
    /// Reorder threshold: stock strictly below this is low.
    pub min_stock: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub sku: String,
    pub barcode: Option<String>,
    pub price: u64,
    pub image_url: Option<String>,
    pub min_stock: u32,
}

/// Descriptive edit: only the provided fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub barcode: Option<String>,
    pub price: Option<u64>,
    pub image_url: Option<String>,
    pub min_stock: Option<u32>,
}

impl Product {
    /// Create a product from validated details.
    pub fn create(id: ProductId, details: NewProduct, now: DateTime<Utc>) -> LedgerResult<Self> {
        if details.name.trim().is_empty() {
            return Err(LedgerError::validation("name cannot be empty"));
        }
        if details.sku.trim().is_empty() {
            return Err(LedgerError::validation("SKU cannot be empty"));
        }
        // Note: SKU uniqueness across the catalog requires store support; at
        // the entity level we can only enforce that it is non-blank.

        Ok(Self {
            id,
            name: details.name,
            description: details.description,
            category: details.category,
            sku: details.sku,
            barcode: details.barcode,
            price: details.price,
            image_url: details.image_url,
            min_stock: details.min_stock,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a descriptive edit, bumping `updated_at`.
    ///
    /// SKU is immutable after creation; stock changes go through the ledger,
    /// never through an edit.
    pub fn edit(&mut self, edit: ProductEdit, now: DateTime<Utc>) -> LedgerResult<()> {
        if let Some(name) = &edit.name {
            if name.trim().is_empty() {
                return Err(LedgerError::validation("name cannot be empty"));
            }
        }

        if let Some(name) = edit.name {
            self.name = name;
        }
        if let Some(description) = edit.description {
            self.description = description;
        }
        if let Some(category) = edit.category {
            self.category = category;
        }
        if let Some(barcode) = edit.barcode {
            self.barcode = Some(barcode);
        }
        if let Some(price) = edit.price {
            self.price = price;
        }
        if let Some(image_url) = edit.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(min_stock) = edit.min_stock {
            self.min_stock = min_stock;
        }
        self.updated_at = now;
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

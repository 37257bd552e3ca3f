//! The record collections the API serves, loaded from a JSON file.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use dashkit_core::{DataUser, Order, Product, TableUser};

/// All record collections. Every array is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub users: Vec<TableUser>,
    pub data_users: Vec<DataUser>,
}

impl Dataset {
    /// Parses a dataset from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid dataset document.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("invalid dataset JSON")
    }

    /// Reads and parses the dataset at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset {}", path.display()))?;
        let dataset = Self::from_json(&text).with_context(|| format!("in {}", path.display()))?;
        info!(
            path = %path.display(),
            products = dataset.products.len(),
            orders = dataset.orders.len(),
            users = dataset.users.len(),
            data_users = dataset.data_users.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }
}

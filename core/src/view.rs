//! Ports between `ProductListClient` and whatever draws the list.
//!
//! # Design
//! The client never owns a rendering substrate. It pushes minimal patches
//! through [`RenderPort`] (full render only on load or a fresh search) and
//! asks the user for input through [`Prompter`]. A terminal, a web page, or a
//! test recorder can sit behind either.

use std::fmt;

use crate::types::Product;

/// Short user-facing notification raised at the end of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    MissingFields,
    Added,
    Updated,
    Deleted,
    LoadFailed,
    AddFailed,
    UpdateFailed,
    DeleteFailed,
    SearchFailed,
}

impl Notice {
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Notice::MissingFields
                | Notice::LoadFailed
                | Notice::AddFailed
                | Notice::UpdateFailed
                | Notice::DeleteFailed
                | Notice::SearchFailed
        )
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::MissingFields => "Please fill all fields.",
            Notice::Added => "Product added!",
            Notice::Updated => "Product updated!",
            Notice::Deleted => "Product deleted",
            Notice::LoadFailed => "Failed to load products",
            Notice::AddFailed => "Error adding product",
            Notice::UpdateFailed => "Failed to update product",
            Notice::DeleteFailed => "Failed to delete product",
            Notice::SearchFailed => "Search failed",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The visual product list plus the add-product form and notification area.
///
/// Elements are keyed by `Product::id`.
pub trait RenderPort {
    /// Clear the list and show `items` in order.
    fn render(&mut self, items: &[Product]);

    /// Add `items` after the last displayed element.
    fn append(&mut self, items: &[Product]);

    /// Add `item` before the first displayed element.
    fn prepend(&mut self, item: &Product);

    /// Replace the element keyed by `id` in place.
    fn patch(&mut self, id: u64, item: &Product);

    /// Remove the element keyed by `id`.
    fn remove(&mut self, id: u64);

    /// Empty the add-product form fields.
    fn clear_form(&mut self);

    fn notify(&mut self, notice: Notice);
}

/// Modal questions put to the user.
pub trait Prompter {
    /// Ask for a line of text, pre-filled with `default`. `None` means the
    /// user cancelled.
    fn prompt(&mut self, label: &str, default: &str) -> Option<String>;

    fn confirm(&mut self, message: &str) -> bool;
}

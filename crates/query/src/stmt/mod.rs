//! Statement resolution against the catalog.

mod insert;
mod update;

pub use insert::InsertStmt;
pub use update::UpdateStmt;

//! Transaction seam used by modifying operators.

use alloc::rc::Rc;
use cinder_core::schema::Table;
use cinder_core::{Result, Row};
use core::cell::RefCell;

/// The write side of a transaction, as seen by operators.
pub trait Transaction {
    /// Replaces `old` with `new` in `table`. Both rows share the same id.
    fn update_record(&mut self, table: &Table, old: &Row, new: &Row) -> Result<()>;
}

/// Shared handle to the transaction an operator tree runs under.
pub type TrxRef = Rc<RefCell<dyn Transaction>>;

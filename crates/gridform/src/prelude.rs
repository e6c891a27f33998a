//! Prelude module - common imports for gridform users
//!
//! ```rust
//! use gridform::prelude::*;
//! ```

pub use crate::{
    // Labels
    column_label,
    row_label,
    // Grid types
    CellIndex,
    CellStore,
    // Session types
    Config,
    ExportWriter,
    FileStore,
    Matrix,
    MemoryStore,
    Notification,
    PersistenceAdapter,
    Session,
    // I/O types
    XlsxReader,
    XlsxWriter,
};

/// Data layer: core types, loading, cleaning and statistics.
///
/// Architecture:
/// ```text
///  uploaded CSV bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  Latin-1 decode + CSV parse + dtype inference → DataTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  drop fixed columns, drop incomplete rows, coerce Amount
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  info / describe / histogram + KDE
///   └──────────┘
/// ```

pub mod clean;
pub mod loader;
pub mod model;
pub mod stats;

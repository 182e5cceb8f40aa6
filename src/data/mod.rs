/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  keep type == "Shot", parse location → ShotDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ ShotDataset │  Vec<ShotEvent>, team / player index
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  team + player selection → visible indices
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;

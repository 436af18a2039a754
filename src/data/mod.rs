/// Data layer: the filter-and-aggregate pipeline, independent of the UI.
///
/// Architecture:
/// ```text
///      sales .csv
///          │
///          ▼
///    ┌──────────┐
///    │  loader   │  decode + schema check → Dataset
///    └──────────┘
///          │
///          ▼
///    ┌──────────┐
///    │  Dataset  │  Vec<Record>, distinct values per dimension
///    └──────────┘
///          │
///          ▼
///    ┌──────────┐
///    │  filter   │  apply Selection → view (record indices)
///    └──────────┘
///          │
///     ┌────┼──────────┐
///     ▼    ▼          ▼
/// aggregate  metrics  export
///  (tables)   (KPIs)  (CSV bytes)
/// ```
///
/// The Dataset is loaded once and never mutated; everything downstream is
/// recomputed in full from `Dataset` + `Selection` on each interaction.

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;

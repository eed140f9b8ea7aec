/// Data layer: core types, loading/cleaning, recommending and aggregates.
///
/// Architecture:
/// ```text
///   zomato_sample.csv (Latin-1)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode, normalise rate/cost, drop malformed rows
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ RestaurantData │  cleaned rows + (name, location) de-duplicated view
///   └────────────────┘
///        │                      │
///        ▼                      ▼
///   ┌──────────┐          ┌──────────┐
///   │  filter   │          │ insights │  frequency tables (cleaned rows)
///   └──────────┘          └──────────┘
///   ranked matches (de-duplicated rows)
/// ```

pub mod filter;
pub mod insights;
pub mod loader;
pub mod model;

/// Data layer: row types, loading, selection and aggregation.
///
/// Architecture:
/// ```text
///  hour.{csv,json,parquet}  day.{csv,json,parquet}
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse files → Vec<HourRecord>, Vec<DayRecord>
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ BikeDataset  │  validated tables, date range
///   └─────────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌───────────┐
///   │  filter   │          │ aggregate  │  group by hour, daily series,
///   └──────────┘          └───────────┘  weather correlation
///   date + hour → RentalSnapshot
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

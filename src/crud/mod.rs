//! Data-access layer: one async function per entity operation, each issuing a
//! single parameterized query. Lookups return `Option`; "not found" is the
//! caller's decision. Mutations use `RETURNING *` so generated and defaulted
//! fields are visible immediately.

pub mod assets;
pub mod instruments;
pub mod orders;
pub mod portfolios;
pub mod summaries;
pub mod trades;
pub mod users;

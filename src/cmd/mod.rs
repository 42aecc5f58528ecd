//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module    | Commands handled                        |
//! |-----------|-----------------------------------------|
//! | `project` | `Init`                                  |
//! | `review`  | `Review`                                |
//! | `records` | `Status`, `Records`, `Export`, `Reset`  |
//! | `config`  | `Config`                                |

pub mod config;
pub mod project;
pub mod records;
pub mod review;

pub use config::cmd_config;
pub use project::cmd_init;
pub use records::{cmd_export, cmd_records, cmd_reset, cmd_status};
pub use review::cmd_review;

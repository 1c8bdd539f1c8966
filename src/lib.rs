//! LexNum - monetary amounts in formal written Spanish
//!
//! Converts amounts such as `1523.45` into the text used on Mexican invoices,
//! cheques and contracts: `MIL QUINIENTOS VEINTITRÉS PESOS 45/100 M.N.`
//!
//! # Features
//!
//! - Exact cents: amounts are normalized through decimal arithmetic, never
//!   through binary floating point
//! - Tolerant input: `$`, `MXN`, `M.N.`, `MN` and thousands separators are accepted
//! - Spreadsheet conversion: finds the `Número`/`Num` column and adds `Texto`
//! - HTTP API (`lexnum-server`) and CLI (`lexnum`)
//!
//! # Example
//!
//! ```
//! use lexnum::core::Converter;
//!
//! let converter = Converter::new();
//! let text = converter.convert_str("$1,523.45")?;
//! assert_eq!(
//!     text.as_deref(),
//!     Some("MIL QUINIENTOS VEINTITRÉS PESOS 45/100 M.N.")
//! );
//! # Ok::<(), lexnum::error::LexNumError>(())
//! ```

pub mod api;
pub mod cli;
pub mod columns;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;

pub use crate::core::{convert, Amount, Converter};
pub use error::{LexNumError, LexNumResult};

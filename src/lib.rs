//! smalisift - organize decompiled Android smali into classes and methods
//!
//! This library turns an apktool output tree into a class → method model and
//! narrows it down to the application's own code.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! 1. **Decompilation** - Run apktool on the archive (optional)
//! 2. **Collection** - Read every unit under the `smali*` directories
//! 3. **Aggregation** - Group units by declared class, sorted by name
//! 4. **Extraction** - Slice `.method` blocks out of each class
//! 5. **Filtering** - Keep the app package, drop system and third-party libraries
//! 6. **Reporting** - Summaries, file listings, method dumps, JSON

pub mod aggregate;
pub mod app;
pub mod collect;
pub mod config;
pub mod decompile;
pub mod error;
pub mod extract;
pub mod filter;
pub mod manifest;
pub mod model;
pub mod report;

pub use aggregate::ClassAggregator;
pub use app::{App, AppSummary};
pub use collect::SourceCollector;
pub use config::Config;
pub use decompile::Decompiler;
pub use error::{Result, SiftError};
pub use extract::MethodExtractor;
pub use filter::{FilterReport, NamespaceFilter, PrefixList, PrefixMatch};
pub use model::{ClassRecord, MethodRecord, RawFile};
pub use report::{ReportFormat, Reporter};

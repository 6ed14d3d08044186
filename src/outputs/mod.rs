//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: Writes and reads the per-category JSON artifacts
//!
//! # Output Structure
//!
//! ```text
//! data_dir/
//! ├── azernews_nation.json
//! ├── ...
//! └── azernews_culture.json
//! ```

pub mod json;

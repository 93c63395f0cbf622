// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod catalog;
pub mod category;
pub mod collate;
pub mod contribute;
pub mod filter;
pub mod forms;
pub mod ids;
pub mod model;
pub mod sort;
pub mod state;
pub mod view;

pub use catalog::*;
pub use category::*;
pub use contribute::*;
pub use filter::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use sort::*;
pub use state::*;
pub use view::*;

#![allow(clippy::needless_pass_by_value)]

pub mod region_tooltip;

pub use region_tooltip::RegionTooltip;

//! Service layer for on-demand fee estimation

mod estimate_service;

pub use estimate_service::{
    parse_block_window, EstimateError, EstimateService, ProviderStage, WindowError,
};

pub mod portfolio_membership;
pub mod portfolio_service;
pub mod stock_catalog;

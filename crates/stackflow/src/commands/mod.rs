pub mod cleanup;
pub mod cleanup_waf;
pub mod deploy;
pub mod deploy_waf;

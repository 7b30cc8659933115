/// TOML configuration (`greenayu.toml`) and `.env` loading.
pub mod toml_config;

use std::path::Path;

pub fn check(config: Option<&Path>) -> anyhow::Result<()> {
    let load = super::load_config(config)?;
    println!("config source: {}", load.source);
    if load.api_key_from_env {
        println!("catalog key: from TMDB_API_KEY");
    }

    if load.warnings.is_empty() {
        println!("ok: no warnings");
        return Ok(());
    }
    println!("ok with {} warning(s):", load.warnings.len());
    for warning in &load.warnings.items {
        println!("  - {}", warning.message);
        if let Some(hint) = &warning.hint {
            println!("    hint: {hint}");
        }
    }
    Ok(())
}

pub fn show(config: Option<&Path>) -> anyhow::Result<()> {
    let mut load = super::load_config(config)?;
    if !load.config.catalog.api_key.is_empty() {
        load.config.catalog.api_key = "********".to_string();
    }
    print!("{}", load.config.to_toml()?);
    Ok(())
}
